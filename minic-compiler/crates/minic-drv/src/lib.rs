//! Driver: a thin orchestrator sequencing lexer, parser, semantic analyser,
//! and IR generator, stopping at the first stage that fails.
//!
//! ```text
//! source text
//!      |
//!      v
//! [ Lexer ] --> Vec<Token>
//!      |
//!      v
//! [ Parser ] --> Stmt (AST root)
//!      |
//!      v
//! [ Semantic Analyser ] --> Stmt, offsets resolved in place
//!      |
//!      v
//! [ IR Generator ] --> Vec<Quadruple>
//! ```
//!
//! Each arrow only runs once the previous stage's `Handler` is clean (§7
//! fail-fast). There is no code generation backend in this crate: the
//! supported inspection surface is `--emit-tokens`/`--emit-ast`/`--emit-ir`.

use std::path::PathBuf;

use minic_ir::{IrGen, Quadruple};
use minic_lex::{Lexer, Token};
use minic_par::{parse, Stmt};
use minic_sem::SemanticAnalyzer;
use minic_util::diagnostic::Diagnostic;
use minic_util::span::SourceMap;
use minic_util::Handler;

/// What to print and stop at, if anything short of full compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitType {
    Tokens,
    Ast,
    Ir,
}

/// Compiler configuration, parsed from `std::env::args`.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_file: PathBuf,
    pub emit: Option<EmitType>,
    pub verbose: bool,
}

impl Config {
    /// Parses CLI arguments (excluding `argv[0]`). Exactly one positional
    /// argument (the source path) is required; `--emit-tokens`,
    /// `--emit-ast`, `--emit-ir` are mutually exclusive; `-v`/`--verbose`
    /// narrates which phase is running.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, CompileError> {
        let mut input_file = None;
        let mut emit = None;
        let mut verbose = false;

        for arg in args {
            match arg.as_str() {
                "--emit-tokens" => emit = Some(EmitType::Tokens),
                "--emit-ast" => emit = Some(EmitType::Ast),
                "--emit-ir" => emit = Some(EmitType::Ir),
                "-v" | "--verbose" => verbose = true,
                _ if arg.starts_with('-') => {
                    return Err(CompileError::InvalidArguments(format!(
                        "unrecognized flag: {arg}"
                    )))
                }
                _ if input_file.is_none() => input_file = Some(PathBuf::from(arg)),
                _ => {
                    return Err(CompileError::InvalidArguments(
                        "exactly one input file is accepted".to_string(),
                    ))
                }
            }
        }

        let input_file = input_file
            .ok_or_else(|| CompileError::InvalidArguments("missing input file".to_string()))?;

        Ok(Config {
            input_file,
            emit,
            verbose,
        })
    }
}

/// Driver error surfaced to `main`: either the CLI itself was misused, the
/// file couldn't be read, or a pipeline stage emitted a diagnostic.
#[derive(Debug)]
pub enum CompileError {
    InvalidArguments(String),
    Io(PathBuf, std::io::Error),
    PipelineFailed,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
            CompileError::Io(path, e) => write!(f, "could not read {}: {e}", path.display()),
            CompileError::PipelineFailed => write!(f, "compilation failed"),
        }
    }
}

impl std::error::Error for CompileError {}

/// One compiler invocation's state: the loaded source and the diagnostics
/// accumulated while compiling it.
pub struct Session {
    pub config: Config,
    pub sources: SourceMap,
    pub handler: Handler,
}

/// What `Session::compile` produced, sized to however far the pipeline got
/// before an early `--emit-*` stop or a failing stage.
pub struct CompilationResult {
    pub tokens: Option<Vec<Token>>,
    pub ast: Option<Stmt>,
    pub ir: Option<Vec<Quadruple>>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session {
            config,
            sources: SourceMap::new(),
            handler: Handler::new(),
        }
    }

    fn narrate(&self, phase: &str) {
        if self.config.verbose {
            eprintln!("minic: running {phase}");
        }
    }

    /// Reads the configured input file, then runs each stage in turn,
    /// stopping at the requested `--emit-*` point or the first stage whose
    /// `Handler` reports an error.
    pub fn compile(&mut self) -> Result<CompilationResult, CompileError> {
        self.narrate("reader");
        let path = self.config.input_file.clone();
        let content = std::fs::read_to_string(&path).map_err(|e| CompileError::Io(path.clone(), e))?;
        let file_id = self.sources.add_file(path.display().to_string(), content);
        let source = self.sources.get(file_id).expect("just inserted");

        self.narrate("lexer");
        let tokens = Lexer::new(source.content()).tokenize();
        if self.config.emit == Some(EmitType::Tokens) {
            return Ok(CompilationResult {
                tokens: Some(tokens),
                ast: None,
                ir: None,
            });
        }

        self.narrate("parser");
        let mut root = match parse(tokens, source.content(), &mut self.handler) {
            Ok(root) => root,
            Err(_) => return Err(CompileError::PipelineFailed),
        };
        if self.handler.has_errors() {
            return Err(CompileError::PipelineFailed);
        }
        if self.config.emit == Some(EmitType::Ast) {
            return Ok(CompilationResult {
                tokens: None,
                ast: Some(root),
                ir: None,
            });
        }

        self.narrate("semantic analyser");
        let content = source.content().to_string();
        let mut analyzer = SemanticAnalyzer::new(&content, &mut self.handler);
        if !analyzer.run(&mut root) {
            return Err(CompileError::PipelineFailed);
        }

        self.narrate("ir generator");
        let ir = IrGen::new().generate(&root);
        if self.config.emit == Some(EmitType::Ir) {
            return Ok(CompilationResult {
                tokens: None,
                ast: None,
                ir: Some(ir),
            });
        }

        Ok(CompilationResult {
            tokens: None,
            ast: Some(root),
            ir: Some(ir),
        })
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.handler.diagnostics()
    }

    /// Renders every accumulated diagnostic the way §6 specifies:
    /// `<source>:<line>:<col>: <message>` followed by the source line and a
    /// caret/tilde underline, written to stderr.
    pub fn report_diagnostics(&self) {
        let file_name = self.config.input_file.display().to_string();
        for diag in self.handler.diagnostics() {
            eprintln!(
                "{file_name}:{}:{}: {}",
                diag.span.line, diag.span.column, diag.message
            );
            for snippet in &diag.snippets {
                eprintln!("{}", snippet.line);
                let start = snippet.start_column.saturating_sub(1);
                let width = (snippet.end_column.saturating_sub(snippet.start_column)).max(1);
                let mut underline = String::new();
                for _ in 0..start {
                    underline.push(' ');
                }
                underline.push('^');
                for _ in 1..width {
                    underline.push('~');
                }
                eprintln!("{underline}");
            }
        }
    }
}

/// Entry point shared by `main.rs` and integration tests: parses CLI
/// arguments from the environment, compiles, prints diagnostics on
/// failure, and returns the process exit code (§6: `0` success, `1` a
/// pipeline diagnostic).
pub fn run() -> Result<i32, CompileError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::parse(args)?;
    let mut session = Session::new(config);

    match session.compile() {
        Ok(result) => {
            if let Some(tokens) = &result.tokens {
                for token in tokens {
                    println!("{token:?}");
                }
            }
            if session.config.emit == Some(EmitType::Ast) {
                if let Some(ast) = &result.ast {
                    println!("{ast:#?}");
                }
            }
            if let Some(ir) = &result.ir {
                if session.config.emit == Some(EmitType::Ir) || session.config.emit.is_none() {
                    println!("main:");
                    for quad in ir {
                        println!("{quad}");
                    }
                }
            }
            Ok(0)
        }
        Err(CompileError::PipelineFailed) => {
            session.report_diagnostics();
            Ok(1)
        }
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(source: &str, emit: Option<EmitType>) -> (Config, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("input.mc");
        std::fs::write(&path, source).expect("write fixture");
        (
            Config {
                input_file: path,
                emit,
                verbose: false,
            },
            dir,
        )
    }

    #[test]
    fn full_pipeline_produces_ir_on_clean_input() {
        let (cfg, _dir) = config("{ int a; a = 1; return a; }", None);
        let mut session = Session::new(cfg);
        let result = session.compile().expect("should compile");
        assert!(result.ir.is_some());
        assert!(!session.handler.has_errors());
    }

    #[test]
    fn emit_tokens_stops_before_parsing() {
        let (cfg, _dir) = config("{ int a; }", Some(EmitType::Tokens));
        let mut session = Session::new(cfg);
        let result = session.compile().expect("should lex");
        assert!(result.tokens.is_some());
        assert!(result.ast.is_none());
    }

    #[test]
    fn emit_ast_stops_before_semantic_analysis() {
        let (cfg, _dir) = config("{ int a; }", Some(EmitType::Ast));
        let mut session = Session::new(cfg);
        let result = session.compile().expect("should parse");
        assert!(result.ast.is_some());
        assert!(result.ir.is_none());
    }

    #[test]
    fn undeclared_identifier_fails_the_pipeline() {
        let (cfg, _dir) = config("{ a = 1; }", None);
        let mut session = Session::new(cfg);
        let err = session.compile().expect_err("should fail");
        assert!(matches!(err, CompileError::PipelineFailed));
        assert!(session.handler.has_errors());
    }

    #[test]
    fn missing_input_file_is_an_io_error() {
        let cfg = Config {
            input_file: PathBuf::from("/nonexistent/path/does-not-exist.mc"),
            emit: None,
            verbose: false,
        };
        let mut session = Session::new(cfg);
        let err = session.compile().expect_err("should fail to read");
        assert!(matches!(err, CompileError::Io(_, _)));
    }

    #[test]
    fn parse_rejects_unknown_flags() {
        let err = Config::parse(["--bogus".to_string(), "a.mc".to_string()]).unwrap_err();
        assert!(matches!(err, CompileError::InvalidArguments(_)));
    }

    #[test]
    fn parse_requires_exactly_one_input_file() {
        let err = Config::parse(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, CompileError::InvalidArguments(_)));

        let err = Config::parse(["a.mc".to_string(), "b.mc".to_string()]).unwrap_err();
        assert!(matches!(err, CompileError::InvalidArguments(_)));
    }
}
