use cymbal_compiler::{
    compile::Analyzer,
    lex::Lexer,
    parsing::{BinaryOp, Block, Decl, DeoStmt, Expr, MainDecl, Parser, Program, Stmt},
    Check, CompileError, Compiler, CompilerConf, Severity,
};

const HELLO: &str = include_str!("programs/hello.cym");

fn init_logger() {
    let _ = simple_logger::SimpleLogger::new().env().init();
}

fn parse(source: &str) -> Program {
    init_logger();
    Parser::new(Lexer::new(source)).parse().unwrap()
}

#[test]
fn test_accepts_program() {
    let conf = CompilerConf::default();
    let warnings = Analyzer::new(&conf).analyze(&parse(HELLO)).unwrap();
    assert!(warnings.is_empty());
}

#[test]
fn test_duplicate_main() {
    let source = "main { }\n\nmain { deo 0x18, 'a' }";

    let err = Compiler::default().compile(source).unwrap_err();
    match err {
        CompileError::Semantic(diagnostics) => {
            assert_eq!(
                diagnostics.to_string(),
                "error at line 3: duplicate main block, first defined at line 1"
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_main_allowed() {
    let conf = CompilerConf {
        duplicate_main: Check::Allow,
        ..Default::default()
    };
    let compiled = Compiler::new(conf).compile("main { }\nmain { }").unwrap();

    assert!(compiled.warnings.is_empty());
    assert_eq!(compiled.image, [0x00, 0x00]);
}

#[test]
fn test_port_out_of_range() {
    let source = "main {\n    deo 0x1234, 1\n}";

    let compiled = Compiler::default().compile(source).unwrap();
    assert_eq!(compiled.warnings.len(), 1);

    let warning = &compiled.warnings.as_slice()[0];
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.line, 1);
    assert_eq!(
        warning.message,
        "port 0x1234 does not fit in a byte and will be truncated to 0x34"
    );
}

#[test]
fn test_port_range_levels() {
    let source = "main { deo 256, 1 }";

    let deny = CompilerConf {
        port_range: Check::Deny,
        ..Default::default()
    };
    let err = Compiler::new(deny).compile(source).unwrap_err();
    assert!(matches!(err, CompileError::Semantic(_)));
    assert!(err.diagnostics().unwrap().has_errors());

    let allow = CompilerConf {
        port_range: Check::Allow,
        ..Default::default()
    };
    let compiled = Compiler::new(allow).compile(source).unwrap();
    assert!(compiled.warnings.is_empty());
}

#[test]
fn test_port_in_range() {
    let compiled = Compiler::default().compile("main { deo 255, 0 deo 0, 0 }").unwrap();
    assert!(compiled.warnings.is_empty());
}

#[test]
fn test_division_by_zero() {
    let program = Program {
        decls: vec![Decl::Main(MainDecl {
            block: Block {
                line: 7,
                stmts: vec![Stmt::Deo(DeoStmt {
                    port: Expr::literal(0x18),
                    value: Expr::binary(
                        BinaryOp::Div,
                        Expr::literal(10),
                        Expr::binary(BinaryOp::Sub, Expr::literal(2), Expr::literal(2)),
                    ),
                })],
            },
        })],
    };

    let conf = CompilerConf::default();
    let errors = Analyzer::new(&conf).analyze(&program).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.as_slice()[0].line, 7);
    assert_eq!(errors.as_slice()[0].message, "division by zero in constant expression");
}

#[test]
fn test_parse_errors_skip_analysis() {
    let err = Compiler::default().compile("main { }\nmain { deo }").unwrap_err();
    match err {
        CompileError::Parse(diagnostics) => assert_eq!(diagnostics.len(), 1),
        other => panic!("unexpected error: {other}"),
    }
}
