//! Function name rewrites between the live runtime and static source.

use std::borrow::Cow;

const SNR_PREFIX: &str = "<SNR>";

/// Numeric chain bodies denote dictionary or anonymous functions, which the
/// runtime calls `{id}`.
pub fn display_name(body: &str) -> Cow<'_, str> {
    if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
        Cow::Owned(format!("{{{body}}}"))
    } else {
        Cow::Borrowed(body)
    }
}

/// Name under which a live function is defined in its source file.
///
/// The runtime reports script-local functions as `<SNR>13_name`, the source
/// spells them `s:name`.
pub fn source_name(funcname: &str) -> Cow<'_, str> {
    let Some(rest) = funcname.strip_prefix(SNR_PREFIX) else {
        return Cow::Borrowed(funcname);
    };
    match rest.find('_') {
        Some(underscore) => Cow::Owned(format!("s:{}", &rest[underscore + 1..])),
        None => Cow::Borrowed(funcname),
    }
}
