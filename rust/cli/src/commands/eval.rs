//! Eval command handler: rank a single 5 to 7 card hand.

use crate::error::CliError;
use crate::formatters::format_board;
use holdem_engine::cards::parse_cards;
use holdem_engine::hand::{evaluate, hand_strength};
use std::io::Write;

pub fn handle_eval_command(cards: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(cards)?;
    let score = evaluate(&cards)?;
    writeln!(out, "Cards: {}", format_board(&cards))?;
    writeln!(
        out,
        "Category: {} ({})",
        score.category,
        score.category.value()
    )?;
    writeln!(out, "Hand: {}", score.describe())?;
    writeln!(out, "Strength: {:.3}", hand_strength(&score))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_category_and_description() {
        let mut out = Vec::new();
        handle_eval_command("As Ks Qs Js Ts 2h", &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Category: Royal Flush (9)"));
        assert!(output.contains("Hand: Royal Flush"));
        assert!(output.contains("Strength: 1.000"));
    }

    #[test]
    fn four_spades_and_a_deuce_is_high_card() {
        let mut out = Vec::new();
        handle_eval_command("As Ks Qs Js 2h", &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Category: High Card (0)"), "{}", output);
    }

    #[test]
    fn rejects_short_and_duplicate_hands() {
        let mut out = Vec::new();
        let err = handle_eval_command("As Ks Qs", &mut out).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
        let err = handle_eval_command("As As Qs Js 2h", &mut out).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert!(out.is_empty());
    }
}
