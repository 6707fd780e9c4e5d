//! Instruction mnemonics of the P3 processor.
//!
//! The table includes the pseudo-instructions which the assembler
//! accepts (`ORIG`, for example, only moves the location counter).
//! Conditional jumps are written with a condition suffix after a dot
//! (`BR.Z`, `JMP.NC`); the suffix is not part of the mnemonic.


keyword_enum! {
    /// One of the instruction keywords of the assembly language.
    pub enum Mnemonic ("mnemonic") {
        Orig => "ORIG",
        Add => "ADD",
        Addc => "ADDC",
        And => "AND",
        Br => "BR",
        Call => "CALL",
        Clc => "CLC",
        Cmc => "CMC",
        Cmp => "CMP",
        Com => "COM",
        Dec => "DEC",
        Div => "DIV",
        Dsi => "DSI",
        Eni => "ENI",
        Inc => "INC",
        Int => "INT",
        Jmp => "JMP",
        Mov => "MOV",
        Mul => "MUL",
        Mvbh => "MVBH",
        Mvbl => "MVBL",
        Neg => "NEG",
        Nop => "NOP",
        Or => "OR",
        Pop => "POP",
        Push => "PUSH",
        Ret => "RET",
        Retn => "RETN",
        Rol => "ROL",
        Rolc => "ROLC",
        Ror => "ROR",
        Rorc => "RORC",
        Rti => "RTI",
        Shl => "SHL",
        Shla => "SHLA",
        Shr => "SHR",
        Shra => "SHRA",
        Stc => "STC",
        Sub => "SUB",
        Subb => "SUBB",
        Test => "TEST",
        Xch => "XCH",
        Xor => "XOR",
    }
}

impl Mnemonic {
    /// Returns true for the instructions which transfer control to a
    /// label (and so whose operand names a jump target).
    #[must_use]
    pub const fn is_jump(&self) -> bool {
        matches!(self, Mnemonic::Call | Mnemonic::Jmp | Mnemonic::Br)
    }

    /// Interprets instruction text as written in a source line,
    /// ignoring any condition suffix (so `BR.NZ` yields
    /// `Mnemonic::Br`).
    #[must_use]
    pub fn from_instruction_text(text: &str) -> Option<Mnemonic> {
        strip_condition(text).parse().ok()
    }
}

/// Removes the `.condition` suffix (if any) from instruction text.
#[must_use]
pub fn strip_condition(text: &str) -> &str {
    match text.find('.') {
        Some(pos) => &text[..pos],
        None => text,
    }
}
