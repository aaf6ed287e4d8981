//! Element text extraction for SOAP login responses.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Return the text of the first element named `tag`, or `None`.
///
/// Matching is by local name, so `sf:exceptionCode`, `exceptionCode` and
/// `soapenv:exceptionCode` all find `<sf:exceptionCode>`. Text and CDATA inside
/// the element are concatenated with entities resolved; an empty element
/// yields `Some("")`.
///
/// Never fails: malformed input yields whatever was found before the parse
/// error, usually `None`.
pub fn extract_element(xml: &[u8], tag: &str) -> Option<String> {
    let wanted = local_part(tag.as_bytes());

    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    // Depth inside the matched element; `None` until we find it.
    let mut depth: Option<usize> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if let Some(d) = depth.as_mut() {
                    *d += 1;
                } else if e.local_name().into_inner() == wanted {
                    depth = Some(0);
                }
            }
            Ok(Event::Empty(ref e)) => {
                if depth.is_none() && e.local_name().into_inner() == wanted {
                    return Some(String::new());
                }
            }
            Ok(Event::Text(ref e)) => {
                if depth.is_some() {
                    let chunk = e
                        .unescape()
                        .map(|t| t.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(e).into_owned());
                    text.push_str(&chunk);
                }
            }
            Ok(Event::CData(ref e)) => {
                if depth.is_some() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(_)) => match depth {
                Some(0) => return Some(text),
                Some(d) => depth = Some(d - 1),
                None => {}
            },
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    None
}

/// Local part of a possibly prefixed name: `sf:exceptionCode` -> `exceptionCode`.
fn local_part(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}
