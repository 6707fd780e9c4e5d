//! Directives which introduce an assignment (`NAME EQU 10`).

keyword_enum! {
    /// An assignment directive.
    pub enum Directive ("directive") {
        Equ => "EQU",
        Word => "WORD",
        Str => "STR",
        Tab => "TAB",
    }
}

#[test]
fn test_directives() {
    assert_eq!("equ".parse::<Directive>(), Ok(Directive::Equ));
    assert_eq!("Tab".parse::<Directive>(), Ok(Directive::Tab));
    assert!("EQUAL".parse::<Directive>().is_err());
    let spellings: Vec<&str> = Directive::ALL.iter().map(Directive::as_str).collect();
    assert_eq!(spellings, vec!["EQU", "WORD", "STR", "TAB"]);
}
