use logos::Logos;

use crate::tokens::Line;
use crate::tokens::Token;

/// Raw lexemes produced by logos for a single line. Every character is
/// either whitespace (space, tab, or the platform line feed) or part of a
/// word.
#[derive(Logos, Debug, PartialEq)]
enum Lexeme {
	#[cfg_attr(not(windows), regex(r"[ \t\n]+"))]
	#[cfg_attr(windows, regex(r"[ \t\r]+"))]
	Whitespace,
	#[cfg_attr(not(windows), regex(r"[^ \t\n]+"))]
	#[cfg_attr(windows, regex(r"[^ \t\r]+"))]
	Word,
}

/// Split a line into whitespace-delimited tokens.
///
/// Token text is kept exactly as it appears in the line. When the line is
/// empty or ends in whitespace, an empty token positioned at the end of the
/// line is appended, so every line contributes a trailing unit to the token
/// stream.
pub fn tokenize_line(line: Line<'_>) -> Vec<Token<'_>> {
	let mut tokens = Vec::new();
	let mut ends_with_word = false;

	for (lexeme, span) in Lexeme::lexer(line.text).spanned() {
		match lexeme {
			Ok(Lexeme::Word) => {
				tokens.push(Token::new(
					&line.text[span.clone()],
					line.offset + span.start,
					line.number,
				));
				ends_with_word = true;
			}
			Ok(Lexeme::Whitespace) | Err(()) => {
				ends_with_word = false;
			}
		}
	}

	if !ends_with_word {
		tokens.push(Token::new(
			&line.text[line.text.len()..],
			line.offset + line.text.len(),
			line.number,
		));
	}

	tokens
}
