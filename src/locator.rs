//! Text block lookup by local element name.
//!
//! Elements are matched on their local name only, so `jppfs_cor:BalanceSheetTextBlock`
//! and `jpcrp_cor:BalanceSheetTextBlock` both match `BalanceSheetTextBlock`
//! whatever namespace they are bound to. The whole document is read so that
//! syntax errors after the block are still reported.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Text of the first element named `block`, or `None` if there is no such
/// element or it has no text.
pub fn locate(xml: &str, block: &str) -> Result<Option<String>, quick_xml::Error> {
    let mut found = locate_all(xml, &[block])?;
    Ok(found.pop().flatten())
}

/// Like [`locate`] for several names in a single pass. The result is indexed
/// like `names`.
pub fn locate_all(xml: &str, names: &[&str]) -> Result<Vec<Option<String>>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);

    let mut found: Vec<Option<String>> = vec![None; names.len()];
    let mut seen = vec![false; names.len()];
    // (name index, element depth, collected text)
    let mut open: Vec<(usize, usize, String)> = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if let Some(i) = first_unseen(names, &seen, e.local_name().as_ref()) {
                    seen[i] = true;
                    open.push((i, depth, String::new()));
                }
            }
            Event::Empty(e) => {
                // self-closing: found, but without text
                if let Some(i) = first_unseen(names, &seen, e.local_name().as_ref()) {
                    seen[i] = true;
                }
            }
            Event::Text(t) => {
                if let Some(text) = direct_text(&mut open, depth) {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(text) = direct_text(&mut open, depth) {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => {
                if let Some(pos) = open.iter().position(|(_, d, _)| *d == depth) {
                    let (i, _, text) = open.remove(pos);
                    if !text.is_empty() {
                        found[i] = Some(text);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(found)
}

fn first_unseen(names: &[&str], seen: &[bool], local: &[u8]) -> Option<usize> {
    names
        .iter()
        .enumerate()
        .position(|(i, name)| !seen[i] && name.as_bytes() == local)
}

fn direct_text(open: &mut [(usize, usize, String)], depth: usize) -> Option<&mut String> {
    open.iter_mut()
        .find(|(_, d, _)| *d == depth)
        .map(|(_, _, text)| text)
}
