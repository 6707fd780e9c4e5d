//! Register names which may appear in instruction operands.
//!
//! R0 to R7 are the general purpose registers.  R8 to R10 do not
//! exist as names; R11 to R15 are the special registers (several of
//! which have their own aliases: R14 is `SP`, R15 is `PC` and so
//! on, according to the register documentation).  `RE` is the state
//! register.

keyword_enum! {
    /// A register name recognised in operand text.
    pub enum Register ("register") {
        Pc => "PC",
        Sp => "SP",
        Re => "RE",
        R0 => "R0",
        R1 => "R1",
        R2 => "R2",
        R3 => "R3",
        R4 => "R4",
        R5 => "R5",
        R6 => "R6",
        R7 => "R7",
        R11 => "R11",
        R12 => "R12",
        R13 => "R13",
        R14 => "R14",
        R15 => "R15",
    }
}

#[test]
fn test_register_names() {
    assert_eq!(Register::ALL.len(), 16);
    assert_eq!("r15".parse::<Register>(), Ok(Register::R15));
    assert_eq!("Sp".parse::<Register>(), Ok(Register::Sp));
    assert!("R8".parse::<Register>().is_err());
    assert!("R10".parse::<Register>().is_err());
    assert_eq!(Register::Re.to_string(), "RE");
}
