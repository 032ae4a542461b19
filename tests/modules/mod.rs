mod accessors;
mod decode;
mod json;

/// Wraps pre-encoded elements in a length header and trailing null.
pub(crate) fn document(elements: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = elements.concat();
    let mut out = ((4 + body.len() + 1) as i32).to_le_bytes().to_vec();
    out.extend(body);
    out.push(0);
    out
}

pub(crate) fn element(tag: u8, key: &str, value: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend(key.as_bytes());
    out.push(0);
    out.extend(value);
    out
}

pub(crate) fn string_value(s: &str) -> Vec<u8> {
    let mut out = ((s.len() + 1) as i32).to_le_bytes().to_vec();
    out.extend(s.as_bytes());
    out.push(0);
    out
}
