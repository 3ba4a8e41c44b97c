//! Operand and line parsing for the assembler.
//!
//! A source line is trimmed and comment-stripped, optionally begins with a
//! `label:`, and is then either a `.directive` or a mnemonic followed by
//! comma-separated operands. Immediates are decimal, hex (`0x...`), or
//! binary (`0b...`); memory operands are `offset(reg)` with the offset
//! optional.

use crate::common::SignedWord;
use crate::isa::abi;

/// Parses a register operand (`x0`-`x31` or an ABI name).
pub fn parse_reg(s: &str) -> Option<usize> {
    abi::parse_reg(s)
}

/// Parses a signed immediate: decimal, `0x...` hex, or `0b...` binary.
pub fn parse_imm(s: &str) -> Option<SignedWord> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }

    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return u32::from_str_radix(hex, 16).ok().map(|v| v as SignedWord);
    }
    if let Some(bin) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        return u32::from_str_radix(bin, 2).ok().map(|v| v as SignedWord);
    }

    t.parse::<SignedWord>().ok()
}

/// Parses a memory operand of the form `offset(reg)`; the offset may be
/// omitted (`(sp)` means offset 0).
pub fn parse_mem(s: &str) -> Option<(SignedWord, usize)> {
    let lp = s.find('(')?;
    let rp = s.rfind(')')?;
    if rp < lp {
        return None;
    }

    let off_str = s[..lp].trim();
    let reg_str = &s[lp + 1..rp];

    let offset = if off_str.is_empty() {
        0
    } else {
        parse_imm(off_str)?
    };

    let reg = parse_reg(reg_str)?;
    Some((offset, reg))
}

/// Strips a `#` comment and trims the line.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(hash) => line[..hash].trim(),
        None => line.trim(),
    }
}

/// Splits an operand list on commas, trimming each piece and dropping
/// empties.
pub fn split_operands(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a line into its lowercase mnemonic and the operand text.
pub fn split_mnemonic(line: &str) -> (String, &str) {
    match line.find(char::is_whitespace) {
        Some(sp) => (line[..sp].to_ascii_lowercase(), line[sp..].trim()),
        None => (line.to_ascii_lowercase(), ""),
    }
}
