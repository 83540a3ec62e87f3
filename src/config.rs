use std::path::PathBuf;

/// Filer names that identify asset managers; their filings are skipped.
pub const DEFAULT_SKIP_WORDS: &[&str] = &[
    "アセットマネジメントＯｎｅ",
    "アセットマネジメント",
    "アセット",
    "ブラックロック・ジャパン株式会社",
    "ピクテ・ジャパン株式会社",
    "インベストメン",
    "投信",
];

/// Filings processed per run unless overridden.
pub const DEFAULT_LIMIT: usize = 1;

/// Run settings for the filing processor
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for relative document paths in a manifest
    pub xbrl_dir: Option<PathBuf>,
    /// Maximum number of filings taken from the source
    pub limit: usize,
    pub skip_words: Vec<String>,
    pub skip_fund_filings: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_xbrl_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.xbrl_dir = dir;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_skip_words(mut self, words: Vec<String>) -> Self {
        self.skip_words = words;
        self
    }

    pub fn with_skip_fund_filings(mut self, skip: bool) -> Self {
        self.skip_fund_filings = skip;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            xbrl_dir: None,
            limit: DEFAULT_LIMIT,
            skip_words: DEFAULT_SKIP_WORDS.iter().map(|w| w.to_string()).collect(),
            skip_fund_filings: false,
        }
    }
}
