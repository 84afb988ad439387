//! URL classifier using nom
//!
//! Only absolute URLs are probed:
//! ```text
//! scheme "://" authority [path] [?query] [#fragment]
//! scheme    = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
//! authority = 1*( any char except "/" "?" "#" )
//! ```

use nom::{
    bytes::complete::{tag, take_while},
    character::complete::satisfy,
    combinator::recognize,
    sequence::{pair, terminated},
    IResult,
};

use crate::error::{Result, SourceError};

/// URL schemes the network probe understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain HTTP
    Http,
    /// HTTP over TLS
    Https,
}

/// A key that passed classification and may be sent over the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget<'a> {
    /// Request scheme
    pub scheme: Scheme,
    /// Host and optional port (and userinfo, if present)
    pub authority: &'a str,
    /// The full URL as given
    pub url: &'a str,
}

fn scheme(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
    ))(input)
}

fn scheme_prefix(input: &str) -> IResult<&str, &str> {
    terminated(scheme, tag("://"))(input)
}

fn authority(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| !matches!(c, '/' | '?' | '#'))(input)
}

/// Classify a key as an HTTP(S) probe target
///
/// Keys without a `scheme://` prefix are malformed. A scheme other than
/// http/https is rejected before the authority is looked at, so `file://`
/// reports an unsupported scheme rather than a missing host.
pub fn classify_url(input: &str) -> Result<ProbeTarget<'_>> {
    let (rest, raw_scheme) =
        scheme_prefix(input).map_err(|_| SourceError::MalformedUrl(input.to_string()))?;

    let scheme = if raw_scheme.eq_ignore_ascii_case("http") {
        Scheme::Http
    } else if raw_scheme.eq_ignore_ascii_case("https") {
        Scheme::Https
    } else {
        return Err(SourceError::UnsupportedScheme(raw_scheme.to_ascii_lowercase()));
    };

    let (_, authority) =
        authority(rest).map_err(|_| SourceError::MalformedUrl(input.to_string()))?;
    if authority.is_empty() {
        return Err(SourceError::MalformedUrl(input.to_string()));
    }

    Ok(ProbeTarget {
        scheme,
        authority,
        url: input,
    })
}
