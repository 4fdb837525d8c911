//! The keyword vocabulary gate for unaddressed messages.
//!
//! A plain channel message only warrants a response when it touches a
//! fixed vocabulary of math/CS terms. Mentions bypass this gate entirely.

use regex::Regex;
use std::sync::OnceLock;

/// Case-insensitive match over the fixed math/CS vocabulary.
pub fn is_math_query(text: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(
            "(?i)(math|algorithm|complexity|big o|equation|formula|calculus|linear algebra|\
             statistics|probability|optimization|function|graph|plot|solve|compute|\
             matrix|vector|derivative|integral|theorem|proof)",
        )
        .expect("valid keyword pattern")
    });
    re.is_match(text)
}
