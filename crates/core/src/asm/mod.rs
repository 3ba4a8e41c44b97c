//! Two-pass assembler for the RV32IM subset.
//!
//! Pass 1 walks the source advancing section cursors and recording label
//! addresses; pass 2 emits machine code with every label resolved.
//! Errors are non-fatal: they accumulate per offending line and the result
//! reports `success = false` when any were seen.
//!
//! The accepted language is the de-facto GNU assembler subset: `#`
//! comments, `label:` definitions, `.text`/`.data` sections, the data
//! directives (`.word`, `.half`, `.byte`, `.asciz`/`.string`, `.space`,
//! `.align`), and the standard pseudo-instructions (`li`, `la`, `mv`,
//! `call`, `ret`, the `b*z`/`bgt`-family, ...).

/// Instruction encoders (six formats + decoded-form re-encoding).
pub mod encode;
/// Operand and line parsing helpers.
pub mod parse;

use std::collections::BTreeMap;
use std::path::Path;

use crate::common::{Address, AsmError, Byte, SignedWord, Word, DATA_BASE, NOP, TEXT_BASE};
use crate::isa::rv32i::opcodes::{
    OP_AUIPC, OP_BRANCH, OP_IMM, OP_JAL, OP_JALR, OP_LOAD, OP_LUI, OP_REG, OP_STORE,
};
use self::encode::{enc_b, enc_i, enc_j, enc_r, enc_s, enc_u};
use self::parse::{parse_imm, parse_mem, parse_reg, split_mnemonic, split_operands, strip_comment};

/// The output of an assembly run.
#[derive(Clone, Debug, Default)]
pub struct AsmResult {
    /// Whether the source assembled without errors.
    pub success: bool,
    /// Text image, one word per instruction, in address order.
    pub text: Vec<Word>,
    /// Data image, in address order.
    pub data: Vec<Byte>,
    /// Base address of the text image.
    pub text_base: Address,
    /// Base address of the data image.
    pub data_base: Address,
    /// Label name to address.
    pub symbols: BTreeMap<String, Address>,
    /// Text address to the original source line that produced it.
    pub source_map: BTreeMap<Address, String>,
    /// Accumulated errors, in source order.
    pub errors: Vec<AsmError>,
}

/// Assembles source text into machine code.
pub fn assemble(source: &str) -> AsmResult {
    Assembler::new().run(source)
}

/// Assembles a source file; an unreadable file is a single error.
pub fn assemble_file(path: impl AsRef<Path>) -> AsmResult {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(source) => assemble(&source),
        Err(e) => AsmResult {
            success: false,
            text_base: TEXT_BASE,
            data_base: DATA_BASE,
            errors: vec![AsmError::new(
                0,
                format!("cannot open file {}: {}", path.display(), e),
            )],
            ..AsmResult::default()
        },
    }
}

/// Assembler state shared by the two passes.
struct Assembler {
    labels: BTreeMap<String, Address>,
    errors: Vec<AsmError>,
    text_out: Vec<Word>,
    data_out: Vec<Byte>,
    source_map: BTreeMap<Address, String>,
    text_addr: Address,
    data_addr: Address,
    in_data: bool,
    line_num: usize,
}

impl Assembler {
    fn new() -> Self {
        Self {
            labels: BTreeMap::new(),
            errors: Vec::new(),
            text_out: Vec::new(),
            data_out: Vec::new(),
            source_map: BTreeMap::new(),
            text_addr: TEXT_BASE,
            data_addr: DATA_BASE,
            in_data: false,
            line_num: 0,
        }
    }

    fn run(mut self, source: &str) -> AsmResult {
        let lines: Vec<&str> = source.lines().collect();

        // Pass 1: size every line and collect labels.
        self.begin_pass();
        for line in &lines {
            self.line_num += 1;
            self.process_line(line, true);
        }
        log::debug!("pass 1: {} label(s)", self.labels.len());

        // Pass 2: emit, resolving labels.
        self.begin_pass();
        for line in &lines {
            self.line_num += 1;
            self.process_line(line, false);
        }
        log::debug!(
            "pass 2: {} word(s) text, {} byte(s) data, {} error(s)",
            self.text_out.len(),
            self.data_out.len(),
            self.errors.len()
        );

        AsmResult {
            success: self.errors.is_empty(),
            text: self.text_out,
            data: self.data_out,
            text_base: TEXT_BASE,
            data_base: DATA_BASE,
            symbols: self.labels,
            source_map: self.source_map,
            errors: self.errors,
        }
    }

    fn begin_pass(&mut self) {
        self.text_addr = TEXT_BASE;
        self.data_addr = DATA_BASE;
        self.in_data = false;
        self.line_num = 0;
    }

    /// Appends a word to the text image and records the source line.
    fn emit(&mut self, w: Word, src: &str) {
        self.source_map.insert(self.text_addr, src.to_string());
        self.text_out.push(w);
        self.text_addr = self.text_addr.wrapping_add(4);
    }

    /// Records an error against the current line. Errors are only
    /// collected during pass 2, so each offending line reports once.
    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(AsmError::new(self.line_num, msg.into()));
    }

    /// Parses a register operand, reporting an error (pass 2) on failure.
    fn reg(&mut self, s: &str, first_pass: bool) -> usize {
        match parse_reg(s) {
            Some(r) => r,
            None => {
                if !first_pass {
                    self.error(format!("invalid register: {}", s.trim()));
                }
                0
            }
        }
    }

    /// Resolves a branch/jump target: a numeric byte offset, or a label
    /// whose offset is computed PC-relative to the current text address.
    /// Pass-2 only; unknown labels report an error and return `None`.
    fn target_offset(&mut self, target: &str) -> Option<SignedWord> {
        let target = target.trim();
        if let Some(off) = parse_imm(target) {
            return Some(off);
        }
        match self.labels.get(target).copied() {
            Some(addr) => Some(addr.wrapping_sub(self.text_addr) as SignedWord),
            None => {
                self.error(format!("unknown label: {}", target));
                None
            }
        }
    }

    fn process_line(&mut self, orig: &str, first_pass: bool) {
        let mut line = strip_comment(orig);
        if line.is_empty() {
            return;
        }

        if let Some(colon) = line.find(':') {
            let label = line[..colon].trim();
            if first_pass {
                let addr = if self.in_data {
                    self.data_addr
                } else {
                    self.text_addr
                };
                self.labels.insert(label.to_string(), addr);
            }
            line = line[colon + 1..].trim();
            if line.is_empty() {
                return;
            }
        }

        if line.starts_with('.') {
            self.handle_directive(line, first_pass);
            return;
        }

        // Instructions are only meaningful in the text section.
        if self.in_data {
            return;
        }

        let (mnem, rest) = split_mnemonic(line);
        let ops = split_operands(rest);

        if !self.handle_pseudo(&mnem, &ops, orig, first_pass) {
            self.handle_instruction(&mnem, &ops, orig, first_pass);
        }
    }

    // =====================================================================
    // Directives
    // =====================================================================

    fn handle_directive(&mut self, line: &str, first_pass: bool) {
        let (dir, rest) = split_mnemonic(line);

        match dir.as_str() {
            ".text" => self.in_data = false,
            ".data" => self.in_data = true,
            ".globl" | ".global" => {}

            ".word" => self.emit_data_values(rest, 4, first_pass),
            ".half" => self.emit_data_values(rest, 2, first_pass),
            ".byte" => self.emit_data_values(rest, 1, first_pass),

            ".asciz" | ".string" => self.emit_string(line, first_pass),

            ".space" => {
                if let Some(sz) = parse_imm(rest) {
                    if self.in_data {
                        if !first_pass {
                            self.data_out.extend(std::iter::repeat(0).take(sz.max(0) as usize));
                        }
                        self.data_addr = self.data_addr.wrapping_add(sz.max(0) as Address);
                    }
                } else if !first_pass {
                    self.error("invalid .space size");
                }
            }

            ".align" => {
                if let Some(p) = parse_imm(rest) {
                    let align = 1u32 << (p.max(0) as u32 & 31);
                    if self.in_data {
                        while self.data_addr % align != 0 {
                            if !first_pass {
                                self.data_out.push(0);
                            }
                            self.data_addr = self.data_addr.wrapping_add(1);
                        }
                    } else {
                        while self.text_addr % align != 0 {
                            if !first_pass {
                                self.emit(NOP, "");
                            } else {
                                self.text_addr = self.text_addr.wrapping_add(4);
                            }
                        }
                    }
                } else if !first_pass {
                    self.error("invalid .align power");
                }
            }

            _ => {
                if !first_pass {
                    self.error(format!("unknown directive: {}", dir));
                }
            }
        }
    }

    /// Emits a comma/whitespace-separated list of values at `size` bytes
    /// each, little-endian, into the data section.
    fn emit_data_values(&mut self, rest: &str, size: u32, first_pass: bool) {
        for tok in rest.split(|c: char| c == ',' || c.is_whitespace()) {
            let tok = tok.trim();
            if tok.is_empty() {
                continue;
            }
            match parse_imm(tok) {
                Some(val) => {
                    if self.in_data {
                        if !first_pass {
                            for j in 0..size {
                                self.data_out.push(((val >> (j * 8)) & 0xFF) as Byte);
                            }
                        }
                        self.data_addr = self.data_addr.wrapping_add(size);
                    }
                }
                None => {
                    if !first_pass {
                        self.error(format!("invalid value: {}", tok));
                    }
                }
            }
        }
    }

    /// Emits a quoted string plus a NUL terminator into the data section,
    /// handling the `\n \t \r \0 \\ \"` escapes.
    fn emit_string(&mut self, line: &str, first_pass: bool) {
        let q1 = line.find('"');
        let q2 = line.rfind('"');
        let (q1, q2) = match (q1, q2) {
            (Some(a), Some(b)) if b > a => (a, b),
            _ => {
                if !first_pass {
                    self.error("missing string literal");
                }
                return;
            }
        };

        let mut bytes = Vec::new();
        let mut chars = line[q1 + 1..q2].chars();
        while let Some(c) = chars.next() {
            let b = if c == '\\' {
                match chars.next() {
                    Some('n') => b'\n',
                    Some('t') => b'\t',
                    Some('r') => b'\r',
                    Some('0') => 0,
                    Some('\\') => b'\\',
                    Some('"') => b'"',
                    Some(other) => other as Byte,
                    None => break,
                }
            } else {
                c as Byte
            };
            bytes.push(b);
        }
        bytes.push(0);

        if self.in_data {
            if !first_pass {
                self.data_out.extend_from_slice(&bytes);
            }
            self.data_addr = self.data_addr.wrapping_add(bytes.len() as Address);
        }
    }

    // =====================================================================
    // Pseudo-instructions
    // =====================================================================

    /// Expands a pseudo-instruction; returns false if `mnem` is not one.
    fn handle_pseudo(&mut self, mnem: &str, ops: &[String], src: &str, first_pass: bool) -> bool {
        // Advance pass-1 sizing for the common one-word case.
        macro_rules! one_word {
            ($this:expr, $w:expr) => {{
                if !first_pass {
                    let w = $w;
                    $this.emit(w, src);
                } else {
                    $this.text_addr = $this.text_addr.wrapping_add(4);
                }
            }};
        }

        match (mnem, ops.len()) {
            ("nop", _) => one_word!(self, NOP),

            ("mv", 2) => {
                let rd = self.reg(&ops[0], first_pass);
                let rs = self.reg(&ops[1], first_pass);
                one_word!(self, enc_i(OP_IMM, rd, 0b000, rs, 0));
            }
            ("not", 2) => {
                let rd = self.reg(&ops[0], first_pass);
                let rs = self.reg(&ops[1], first_pass);
                one_word!(self, enc_i(OP_IMM, rd, 0b100, rs, -1));
            }
            ("neg", 2) => {
                let rd = self.reg(&ops[0], first_pass);
                let rs = self.reg(&ops[1], first_pass);
                one_word!(self, enc_r(OP_REG, rd, 0b000, 0, rs, 0b0100000));
            }
            ("seqz", 2) => {
                let rd = self.reg(&ops[0], first_pass);
                let rs = self.reg(&ops[1], first_pass);
                one_word!(self, enc_i(OP_IMM, rd, 0b011, rs, 1));
            }
            ("snez", 2) => {
                let rd = self.reg(&ops[0], first_pass);
                let rs = self.reg(&ops[1], first_pass);
                one_word!(self, enc_r(OP_REG, rd, 0b011, 0, rs, 0));
            }
            ("sltz", 2) => {
                let rd = self.reg(&ops[0], first_pass);
                let rs = self.reg(&ops[1], first_pass);
                one_word!(self, enc_r(OP_REG, rd, 0b010, rs, 0, 0));
            }
            ("sgtz", 2) => {
                let rd = self.reg(&ops[0], first_pass);
                let rs = self.reg(&ops[1], first_pass);
                one_word!(self, enc_r(OP_REG, rd, 0b010, 0, rs, 0));
            }

            ("li", 2) => {
                let rd = self.reg(&ops[0], first_pass);
                let imm = match parse_imm(&ops[1]) {
                    Some(v) => v,
                    None => {
                        if !first_pass {
                            self.error("invalid immediate");
                        }
                        return true;
                    }
                };
                if (-2048..2048).contains(&imm) {
                    one_word!(self, enc_i(OP_IMM, rd, 0b000, 0, imm));
                } else {
                    let upper = ((imm.wrapping_add(0x800) >> 12) as u32) & 0xFFFFF;
                    let lower = imm.wrapping_sub((upper << 12) as SignedWord);
                    if !first_pass {
                        self.emit(enc_u(OP_LUI, rd, (upper << 12) as SignedWord), src);
                        if lower != 0 {
                            self.emit(enc_i(OP_IMM, rd, 0b000, rd, lower), src);
                        }
                    } else {
                        self.text_addr = self.text_addr.wrapping_add(4);
                        if lower != 0 {
                            self.text_addr = self.text_addr.wrapping_add(4);
                        }
                    }
                }
            }

            ("la", 2) => {
                let rd = self.reg(&ops[0], first_pass);
                if !first_pass {
                    let label = ops[1].trim();
                    match self.labels.get(label).copied() {
                        Some(addr) => {
                            // PC-relative pair: label - pc_of_auipc.
                            let off = addr.wrapping_sub(self.text_addr) as SignedWord;
                            let upper = ((off.wrapping_add(0x800) >> 12) as u32) & 0xFFFFF;
                            let lower = off.wrapping_sub((upper << 12) as SignedWord);
                            self.emit(enc_u(OP_AUIPC, rd, (upper << 12) as SignedWord), src);
                            self.emit(enc_i(OP_IMM, rd, 0b000, rd, lower), src);
                        }
                        None => {
                            self.error(format!("unknown label: {}", label));
                        }
                    }
                } else {
                    self.text_addr = self.text_addr.wrapping_add(8);
                }
            }

            ("j", 1) => {
                if !first_pass {
                    if let Some(off) = self.target_offset(&ops[0]) {
                        self.emit(enc_j(OP_JAL, 0, off), src);
                    }
                } else {
                    self.text_addr = self.text_addr.wrapping_add(4);
                }
            }
            ("jr", 1) => {
                let rs = self.reg(&ops[0], first_pass);
                one_word!(self, enc_i(OP_JALR, 0, 0b000, rs, 0));
            }
            ("ret", _) => one_word!(self, enc_i(OP_JALR, 0, 0b000, 1, 0)),
            ("call", 1) => {
                if !first_pass {
                    if let Some(off) = self.target_offset(&ops[0]) {
                        self.emit(enc_j(OP_JAL, 1, off), src);
                    }
                } else {
                    self.text_addr = self.text_addr.wrapping_add(4);
                }
            }
            ("tail", 1) => {
                if !first_pass {
                    if let Some(off) = self.target_offset(&ops[0]) {
                        self.emit(enc_j(OP_JAL, 0, off), src);
                    }
                } else {
                    self.text_addr = self.text_addr.wrapping_add(4);
                }
            }

            // Single-register branch pseudos: compare against x0.
            ("beqz", 2) | ("bnez", 2) | ("blez", 2) | ("bgez", 2) | ("bltz", 2) | ("bgtz", 2) => {
                let rs = self.reg(&ops[0], first_pass);
                let (f3, rs1, rs2) = match mnem {
                    "beqz" => (0b000, rs, 0),
                    "bnez" => (0b001, rs, 0),
                    "blez" => (0b101, 0, rs), // x0 >= rs
                    "bgez" => (0b101, rs, 0), // rs >= x0
                    "bltz" => (0b100, rs, 0), // rs < x0
                    _ => (0b100, 0, rs),      // bgtz: x0 < rs
                };
                if !first_pass {
                    if let Some(off) = self.target_offset(&ops[1]) {
                        self.emit(enc_b(OP_BRANCH, f3, rs1, rs2, off), src);
                    }
                } else {
                    self.text_addr = self.text_addr.wrapping_add(4);
                }
            }

            // Reversed-operand branch pseudos.
            ("bgt", 3) | ("ble", 3) | ("bgtu", 3) | ("bleu", 3) => {
                let rs = self.reg(&ops[0], first_pass);
                let rt = self.reg(&ops[1], first_pass);
                let f3 = match mnem {
                    "bgt" => 0b100,  // blt rt, rs
                    "ble" => 0b101,  // bge rt, rs
                    "bgtu" => 0b110, // bltu rt, rs
                    _ => 0b111,      // bleu: bgeu rt, rs
                };
                if !first_pass {
                    if let Some(off) = self.target_offset(&ops[2]) {
                        self.emit(enc_b(OP_BRANCH, f3, rt, rs, off), src);
                    }
                } else {
                    self.text_addr = self.text_addr.wrapping_add(4);
                }
            }

            _ => return false,
        }
        true
    }

    // =====================================================================
    // Real instructions
    // =====================================================================

    fn handle_instruction(&mut self, mnem: &str, ops: &[String], src: &str, first_pass: bool) {
        macro_rules! one_word {
            ($this:expr, $w:expr) => {{
                if !first_pass {
                    let w = $w;
                    $this.emit(w, src);
                } else {
                    $this.text_addr = $this.text_addr.wrapping_add(4);
                }
            }};
        }

        // R-type, including the M extension.
        let r_funct = |m: &str| -> Option<(u32, u32)> {
            Some(match m {
                "add" => (0b000, 0b0000000),
                "sub" => (0b000, 0b0100000),
                "sll" => (0b001, 0b0000000),
                "slt" => (0b010, 0b0000000),
                "sltu" => (0b011, 0b0000000),
                "xor" => (0b100, 0b0000000),
                "srl" => (0b101, 0b0000000),
                "sra" => (0b101, 0b0100000),
                "or" => (0b110, 0b0000000),
                "and" => (0b111, 0b0000000),
                "mul" => (0b000, 0b0000001),
                "mulh" => (0b001, 0b0000001),
                "mulhsu" => (0b010, 0b0000001),
                "mulhu" => (0b011, 0b0000001),
                "div" => (0b100, 0b0000001),
                "divu" => (0b101, 0b0000001),
                "rem" => (0b110, 0b0000001),
                "remu" => (0b111, 0b0000001),
                _ => return None,
            })
        };

        if let Some((f3, f7)) = r_funct(mnem) {
            if ops.len() == 3 {
                let rd = self.reg(&ops[0], first_pass);
                let rs1 = self.reg(&ops[1], first_pass);
                let rs2 = self.reg(&ops[2], first_pass);
                one_word!(self, enc_r(OP_REG, rd, f3, rs1, rs2, f7));
            } else if !first_pass {
                self.error(format!("{} expects rd, rs1, rs2", mnem));
            }
            return;
        }

        // I-type arithmetic.
        let i_funct = |m: &str| -> Option<u32> {
            Some(match m {
                "addi" => 0b000,
                "slti" => 0b010,
                "sltiu" => 0b011,
                "xori" => 0b100,
                "ori" => 0b110,
                "andi" => 0b111,
                _ => return None,
            })
        };

        if let Some(f3) = i_funct(mnem) {
            if ops.len() == 3 {
                let rd = self.reg(&ops[0], first_pass);
                let rs1 = self.reg(&ops[1], first_pass);
                match parse_imm(&ops[2]) {
                    Some(imm) => one_word!(self, enc_i(OP_IMM, rd, f3, rs1, imm)),
                    None => {
                        if !first_pass {
                            self.error(format!("invalid immediate: {}", ops[2]));
                        } else {
                            self.text_addr = self.text_addr.wrapping_add(4);
                        }
                    }
                }
            } else if !first_pass {
                self.error(format!("{} expects rd, rs1, imm", mnem));
            }
            return;
        }

        // Shift-immediates: shamt in the rs2 field; SRAI via funct7 bit 5.
        if matches!(mnem, "slli" | "srli" | "srai") {
            if ops.len() == 3 {
                let rd = self.reg(&ops[0], first_pass);
                let rs1 = self.reg(&ops[1], first_pass);
                match parse_imm(&ops[2]) {
                    Some(shamt) => {
                        let f3 = if mnem == "slli" { 0b001 } else { 0b101 };
                        let f7 = if mnem == "srai" { 0b0100000 } else { 0b0000000 };
                        one_word!(
                            self,
                            enc_r(OP_IMM, rd, f3, rs1, (shamt & 0x1F) as usize, f7)
                        );
                    }
                    None => {
                        if !first_pass {
                            self.error(format!("invalid shift amount: {}", ops[2]));
                        } else {
                            self.text_addr = self.text_addr.wrapping_add(4);
                        }
                    }
                }
            } else if !first_pass {
                self.error(format!("{} expects rd, rs1, shamt", mnem));
            }
            return;
        }

        // Loads: rd, offset(rs1).
        let load_funct = |m: &str| -> Option<u32> {
            Some(match m {
                "lb" => 0b000,
                "lh" => 0b001,
                "lw" => 0b010,
                "lbu" => 0b100,
                "lhu" => 0b101,
                _ => return None,
            })
        };

        if let Some(f3) = load_funct(mnem) {
            if ops.len() == 2 {
                let rd = self.reg(&ops[0], first_pass);
                match parse_mem(&ops[1]) {
                    Some((off, rs1)) => one_word!(self, enc_i(OP_LOAD, rd, f3, rs1, off)),
                    None => {
                        if !first_pass {
                            self.error(format!("invalid memory operand: {}", ops[1]));
                        } else {
                            self.text_addr = self.text_addr.wrapping_add(4);
                        }
                    }
                }
            } else if !first_pass {
                self.error(format!("{} expects rd, offset(rs1)", mnem));
            }
            return;
        }

        // Stores: rs2, offset(rs1).
        let store_funct = |m: &str| -> Option<u32> {
            Some(match m {
                "sb" => 0b000,
                "sh" => 0b001,
                "sw" => 0b010,
                _ => return None,
            })
        };

        if let Some(f3) = store_funct(mnem) {
            if ops.len() == 2 {
                let rs2 = self.reg(&ops[0], first_pass);
                match parse_mem(&ops[1]) {
                    Some((off, rs1)) => one_word!(self, enc_s(OP_STORE, f3, rs1, rs2, off)),
                    None => {
                        if !first_pass {
                            self.error(format!("invalid memory operand: {}", ops[1]));
                        } else {
                            self.text_addr = self.text_addr.wrapping_add(4);
                        }
                    }
                }
            } else if !first_pass {
                self.error(format!("{} expects rs2, offset(rs1)", mnem));
            }
            return;
        }

        // Branches: rs1, rs2, target.
        let branch_funct = |m: &str| -> Option<u32> {
            Some(match m {
                "beq" => 0b000,
                "bne" => 0b001,
                "blt" => 0b100,
                "bge" => 0b101,
                "bltu" => 0b110,
                "bgeu" => 0b111,
                _ => return None,
            })
        };

        if let Some(f3) = branch_funct(mnem) {
            if ops.len() == 3 {
                let rs1 = self.reg(&ops[0], first_pass);
                let rs2 = self.reg(&ops[1], first_pass);
                if !first_pass {
                    if let Some(off) = self.target_offset(&ops[2]) {
                        self.emit(enc_b(OP_BRANCH, f3, rs1, rs2, off), src);
                    }
                } else {
                    self.text_addr = self.text_addr.wrapping_add(4);
                }
            } else if !first_pass {
                self.error(format!("{} expects rs1, rs2, target", mnem));
            }
            return;
        }

        match mnem {
            // jal [rd,] target
            "jal" => {
                let (rd, target) = match ops.len() {
                    1 => (1, &ops[0]),
                    2 => (self.reg(&ops[0], first_pass), &ops[1]),
                    _ => {
                        if !first_pass {
                            self.error("invalid jal format");
                        }
                        return;
                    }
                };
                if !first_pass {
                    if let Some(off) = self.target_offset(target) {
                        self.emit(enc_j(OP_JAL, rd, off), src);
                    }
                } else {
                    self.text_addr = self.text_addr.wrapping_add(4);
                }
            }

            // jalr rs1 | jalr rd, offset(rs1) | jalr rd, rs1 | jalr rd, rs1, offset
            "jalr" => {
                let (rd, rs1, off) = match ops.len() {
                    1 => (1, self.reg(&ops[0], first_pass), 0),
                    2 => {
                        let rd = self.reg(&ops[0], first_pass);
                        if let Some(rs1) = parse_reg(&ops[1]) {
                            (rd, rs1, 0)
                        } else if let Some((off, rs1)) = parse_mem(&ops[1]) {
                            (rd, rs1, off)
                        } else {
                            if !first_pass {
                                self.error(format!("invalid jalr operand: {}", ops[1]));
                            }
                            (rd, 0, 0)
                        }
                    }
                    3 => {
                        let rd = self.reg(&ops[0], first_pass);
                        let rs1 = self.reg(&ops[1], first_pass);
                        let off = parse_imm(&ops[2]).unwrap_or_else(|| {
                            if !first_pass {
                                self.error(format!("invalid immediate: {}", ops[2]));
                            }
                            0
                        });
                        (rd, rs1, off)
                    }
                    _ => {
                        if !first_pass {
                            self.error("invalid jalr format");
                        }
                        return;
                    }
                };
                one_word!(self, enc_i(OP_JALR, rd, 0b000, rs1, off));
            }

            "lui" | "auipc" => {
                if ops.len() == 2 {
                    let rd = self.reg(&ops[0], first_pass);
                    match parse_imm(&ops[1]) {
                        Some(imm) => {
                            let op = if mnem == "lui" { OP_LUI } else { OP_AUIPC };
                            one_word!(self, enc_u(op, rd, imm << 12));
                        }
                        None => {
                            if !first_pass {
                                self.error(format!("invalid immediate: {}", ops[1]));
                            } else {
                                self.text_addr = self.text_addr.wrapping_add(4);
                            }
                        }
                    }
                } else if !first_pass {
                    self.error(format!("{} expects rd, imm", mnem));
                }
            }

            "ecall" => one_word!(self, 0x0000_0073),
            "ebreak" => one_word!(self, 0x0010_0073),

            _ => {
                if !first_pass {
                    self.error(format!("unknown instruction: {}", mnem));
                }
            }
        }
    }
}
