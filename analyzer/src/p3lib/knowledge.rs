//! Documentation of instructions and registers.
//!
//! The documentation lives in two tables of semicolon-separated
//! rows.  `instructions.csv` has rows of the form
//!
//! `name;operand format;description;flags;is pseudo`
//!
//! where the flags are some of the letters Z, C, N, O and E (the
//! flags the instruction changes), and the last field is `true` for
//! pseudo-instructions.  `registers.csv` has rows of the form
//!
//! `name;description;alias,alias,...`
//!
//! A malformed row makes the whole table unusable.
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{event, Level};

pub const INSTRUCTIONS_FILE: &str = "instructions.csv";
pub const REGISTERS_FILE: &str = "registers.csv";

/// The flags an instruction may change, in the order we list them.
const FLAG_LETTERS: [char; 5] = ['Z', 'C', 'N', 'O', 'E'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Instructions,
    Registers,
}

impl Table {
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        match self {
            Table::Instructions => INSTRUCTIONS_FILE,
            Table::Registers => REGISTERS_FILE,
        }
    }
}

#[derive(Debug)]
pub enum KnowledgeBaseError {
    Io {
        path: PathBuf,
        error: IoError,
    },
    MalformedRow {
        table: Table,
        /// Zero-based index of the row in the file.
        line_index: usize,
        content: String,
        msg: String,
    },
}

impl Display for KnowledgeBaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            KnowledgeBaseError::Io { path, error } => {
                write!(f, "failed to read {}: {error}", path.display())
            }
            KnowledgeBaseError::MalformedRow {
                table,
                line_index,
                content,
                msg,
            } => {
                write!(
                    f,
                    "error parsing file '{}' on line [{line_index}]: '{content}': {msg}",
                    table.file_name()
                )
            }
        }
    }
}

impl Error for KnowledgeBaseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KnowledgeBaseError::Io { error, .. } => Some(error),
            KnowledgeBaseError::MalformedRow { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionDoc {
    pub name: String,
    pub format: String,
    pub description: String,
    /// Flag letters, in `ZCNOE` order.
    pub flags: String,
    pub pseudo: bool,
}

impl InstructionDoc {
    fn from_row(row: &str) -> Result<InstructionDoc, String> {
        let fields: Vec<&str> = row.split(';').collect();
        if fields.len() < 4 {
            return Err(format!(
                "expected at least 4 fields separated by ';' but found {}",
                fields.len()
            ));
        }
        let mask = fields[3].to_uppercase();
        Ok(InstructionDoc {
            name: fields[0].to_uppercase(),
            format: fields[1].to_string(),
            description: fields[2].to_string(),
            flags: FLAG_LETTERS
                .iter()
                .filter(|flag| mask.contains(**flag))
                .collect(),
            pseudo: fields.get(4).is_some_and(|p| p.trim() == "true"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterDoc {
    pub name: String,
    pub description: String,
    pub aliases: Vec<String>,
}

impl RegisterDoc {
    fn from_row(row: &str) -> Result<RegisterDoc, String> {
        let fields: Vec<&str> = row.split(';').collect();
        if fields.len() < 3 {
            return Err(format!(
                "expected at least 3 fields separated by ';' but found {}",
                fields.len()
            ));
        }
        Ok(RegisterDoc {
            name: fields[0].to_uppercase(),
            description: fields[1].to_string(),
            aliases: fields[2]
                .split(',')
                .map(str::trim)
                .filter(|alias| !alias.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Parses every non-empty row of `text`.  The first malformed row
/// stops the parse.
fn parse_rows<T>(
    table: Table,
    text: &str,
    parse_row: fn(&str) -> Result<T, String>,
) -> Result<Vec<T>, KnowledgeBaseError> {
    let mut items = Vec::new();
    for (line_index, row) in text.lines().enumerate() {
        if row.is_empty() {
            continue;
        }
        match parse_row(row) {
            Ok(item) => {
                items.push(item);
            }
            Err(msg) => {
                event!(
                    Level::ERROR,
                    "Error parsing file '{}' on line [{line_index}]: '{row}'",
                    table.file_name()
                );
                return Err(KnowledgeBaseError::MalformedRow {
                    table,
                    line_index,
                    content: row.to_string(),
                    msg,
                });
            }
        }
    }
    Ok(items)
}

/// Instruction and register documentation, looked up by name.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    instructions: BTreeMap<String, InstructionDoc>,
    registers: Vec<RegisterDoc>,
    // Maps register names and aliases to positions in `registers`.
    register_names: BTreeMap<String, usize>,
}

impl KnowledgeBase {
    /// Parses the text of the two tables.
    ///
    /// # Errors
    ///
    /// Fails with [`KnowledgeBaseError::MalformedRow`] on the first
    /// row which doesn't have enough fields.
    pub fn parse(instructions: &str, registers: &str) -> Result<KnowledgeBase, KnowledgeBaseError> {
        let mut kb = KnowledgeBase::default();
        for inst in parse_rows(Table::Instructions, instructions, InstructionDoc::from_row)? {
            kb.instructions.insert(inst.name.clone(), inst);
        }
        for reg in parse_rows(Table::Registers, registers, RegisterDoc::from_row)? {
            let pos = kb.registers.len();
            for alias in &reg.aliases {
                kb.register_names.insert(alias.to_uppercase(), pos);
            }
            kb.register_names.insert(reg.name.clone(), pos);
            kb.registers.push(reg);
        }
        event!(
            Level::DEBUG,
            "knowledge base has {} instructions and {} registers",
            kb.instructions.len(),
            kb.registers.len()
        );
        Ok(kb)
    }

    /// Loads `instructions.csv` and `registers.csv` from `dir`.
    ///
    /// # Errors
    ///
    /// Fails if either file cannot be read or contains a malformed
    /// row.
    pub fn load(dir: &Path) -> Result<KnowledgeBase, KnowledgeBaseError> {
        fn read(path: PathBuf) -> Result<String, KnowledgeBaseError> {
            std::fs::read_to_string(&path).map_err(|error| KnowledgeBaseError::Io { path, error })
        }
        let instructions = read(dir.join(INSTRUCTIONS_FILE))?;
        let registers = read(dir.join(REGISTERS_FILE))?;
        KnowledgeBase::parse(&instructions, &registers)
    }

    /// Looks up an instruction (ignoring case).
    #[must_use]
    pub fn instruction(&self, name: &str) -> Option<&InstructionDoc> {
        self.instructions.get(&name.to_uppercase())
    }

    /// Looks up a register by name or alias (ignoring case).
    #[must_use]
    pub fn register(&self, name: &str) -> Option<&RegisterDoc> {
        self.register_names
            .get(&name.to_uppercase())
            .map(|pos| &self.registers[*pos])
    }

    pub fn instructions(&self) -> impl Iterator<Item = &InstructionDoc> {
        self.instructions.values()
    }

    pub fn registers(&self) -> impl Iterator<Item = &RegisterDoc> {
        self.registers.iter()
    }
}

#[cfg(test)]
const INSTRUCTIONS: &str = "\
MOV;MOV op1, op2;Copies op2 to op1.;;false
add;ADD op1, op2;Adds op2 to op1.;zcnoX;false
NOP;NOP;Does nothing.;;true

JMP;JMP op;Jumps to op.;
";

#[cfg(test)]
const REGISTERS: &str = "\
R7;General purpose register.;
R14;Stack pointer.;SP
R15;Program counter.;PC, pc2
";

#[test]
fn test_parse_instructions() {
    let kb = KnowledgeBase::parse(INSTRUCTIONS, "").expect("test data is valid");
    assert_eq!(kb.instructions().count(), 4);
    let add = kb.instruction("ADD").expect("ADD is documented");
    assert_eq!(add.name, "ADD");
    assert_eq!(add.format, "ADD op1, op2");
    assert_eq!(add.flags, "ZCNO");
    assert!(!add.pseudo);
    assert!(kb.instruction("nop").expect("NOP is documented").pseudo);
    let jmp = kb.instruction("JMP").expect("JMP is documented");
    assert_eq!(jmp.flags, "");
    assert!(!jmp.pseudo);
    assert!(kb.instruction("CALL").is_none());
}

#[test]
fn test_parse_registers() {
    let kb = KnowledgeBase::parse("", REGISTERS).expect("test data is valid");
    assert_eq!(kb.registers().count(), 3);
    assert!(kb.register("R7").expect("R7 is documented").aliases.is_empty());
    assert_eq!(kb.register("sp").map(|r| r.name.as_str()), Some("R14"));
    assert_eq!(kb.register("PC").map(|r| r.name.as_str()), Some("R15"));
    assert_eq!(kb.register("PC2").map(|r| r.name.as_str()), Some("R15"));
    assert_eq!(
        kb.register("R15").map(|r| r.aliases.clone()),
        Some(vec!["PC".to_string(), "pc2".to_string()])
    );
    assert!(kb.register("R0").is_none());
}

#[test]
fn test_malformed_instruction_row() {
    let text = "MOV;MOV op1, op2;Copies.;;false\nBROKEN;row\n";
    match KnowledgeBase::parse(text, REGISTERS) {
        Err(KnowledgeBaseError::MalformedRow {
            table,
            line_index,
            content,
            msg: _,
        }) => {
            assert_eq!(table, Table::Instructions);
            assert_eq!(line_index, 1);
            assert_eq!(content, "BROKEN;row");
        }
        other => panic!("expected a malformed row error, got {other:?}"),
    }
}

#[test]
fn test_malformed_register_row() {
    let err = KnowledgeBase::parse(INSTRUCTIONS, "R1;no aliases field")
        .expect_err("the register row is malformed");
    assert_eq!(
        err.to_string(),
        "error parsing file 'registers.csv' on line [0]: 'R1;no aliases field': \
         expected at least 3 fields separated by ';' but found 2"
    );
}
