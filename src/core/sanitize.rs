// src/core/sanitize.rs
//! Text clean-up applied to labels read off the arrival board.

use std::sync::LazyLock;

use regex::Regex;

/// A word character glued to a trailing `to`, e.g. `Conestogato` in `Conestogato Mall`.
static FUSED_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)to\b").expect("static regex"));

/// Re-insert the space the board drops between a place name and `to`.
///
/// Only the first fused join is repaired; a standalone ` to ` is left alone because
/// the character before it is a space, not a word character.
pub fn repair_fused_to(destination: &str) -> String {
    FUSED_TO.replacen(destination, 1, "$1 to").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_fused_to() {
        assert_eq!(repair_fused_to("Conestogato Mall"), "Conestoga to Mall");
        assert_eq!(repair_fused_to("Downtownto Waterloo"), "Downtown to Waterloo");
    }

    #[test]
    fn leaves_standalone_to_alone() {
        assert_eq!(repair_fused_to("Uptown to Fairway"), "Uptown to Fairway");
        assert_eq!(repair_fused_to("Ainslie Terminal"), "Ainslie Terminal");
        assert_eq!(repair_fused_to("Stone Road Mall"), "Stone Road Mall");
    }

    #[test]
    fn only_first_join_is_repaired() {
        assert_eq!(repair_fused_to("Aato Bbto Cc"), "Aa to Bbto Cc");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(repair_fused_to(""), "");
    }
}
