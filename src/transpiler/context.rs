//! Compilation context: everything one script needs while it is compiled.

use std::collections::HashSet;
use std::io::Write;

use tracing::{debug, info};

use super::Options;
use super::state::{ResultTarget, Resume, State};
use crate::dialect::DatabaseEngine;
use crate::error::{RdbResult, RdbUnitError};
use crate::include::{self, IncludeResolver};
use crate::ordered;
use crate::parser::{Directive, StatementKind, parse_directive, shell_split, table_declaration};
use crate::references::{ReferenceRewriter, TEST_PREFIX, isolated_table_name, referenced_databases};
use crate::table::{EXPECTED_TABLE, SELECT_RESULT_TABLE, TableSpec};
use crate::verdict::Verdict;

pub(crate) struct Context<'a, W: Write> {
    engine: &'a dyn DatabaseEngine,
    options: &'a Options,
    resolver: &'a dyn IncludeResolver,
    out: &'a mut W,
    test_name: &'a str,
    /// Databases already dropped and created in this script.
    created_databases: HashSet<String>,
    /// Databases referenced as `db.table`, without prefix.
    referenced: Vec<String>,
    rewriter: ReferenceRewriter,
    ordered: bool,
    test_number: usize,
    kind: Option<StatementKind>,
    line: usize,
}

impl<'a, W: Write> Context<'a, W> {
    pub(crate) fn new(
        engine: &'a dyn DatabaseEngine,
        options: &'a Options,
        resolver: &'a dyn IncludeResolver,
        out: &'a mut W,
        test_name: &'a str,
        lines: &[&str],
    ) -> Self {
        let referenced = referenced_databases(lines);
        let rewriter = ReferenceRewriter::new(&referenced);

        Self {
            engine,
            options,
            resolver,
            out,
            test_name,
            created_databases: HashSet::new(),
            referenced,
            rewriter,
            ordered: ordered::requests_ordered(lines),
            test_number: 1,
            kind: None,
            line: 0,
        }
    }

    /// Compile the script, returning the number of test cases.
    pub(crate) fn run(mut self, lines: &[&str]) -> RdbResult<usize> {
        self.prologue()?;

        let mut state = State::Initial;
        for (index, raw) in lines.iter().enumerate() {
            self.line = index + 1;
            let line = raw.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            state = self.step(state, line)?;
        }

        if state != State::Initial {
            return Err(RdbUnitError::UnterminatedBlock {
                line: self.line,
                state: state.name(),
            });
        }

        let count = self.test_number - 1;
        self.emit(format!("SELECT '1..{}';", count))?;
        info!(test = self.test_name, count, ordered = self.ordered, "compiled test script");
        Ok(count)
    }

    fn prologue(&mut self) -> RdbResult<()> {
        let header = format!("-- Input from {}", self.test_name);
        self.emit(header)?;
        self.emit_all(self.engine.initialize())?;

        if !self.options.existing_database {
            let default = self.options.default_database.clone();
            self.create_database(&default)?;
            if let Some(statement) = self.engine.use_database(&default) {
                self.emit(statement)?;
            }
        }

        let referenced = self.referenced.clone();
        for db in referenced {
            self.create_database(&format!("{}{}", TEST_PREFIX, db))?;
        }
        Ok(())
    }

    fn step(&mut self, state: State, line: &str) -> RdbResult<State> {
        let from = state.name();
        let next = match state {
            State::Initial => self.initial(line)?,
            State::Setup { table } => self.setup(table, line)?,
            State::Sql { lines } => self.sql(lines, line)?,
            State::TableColumns { table, resume } => self.table_columns(table, resume, line),
            State::Result { target } => self.result(target, line)?,
        };
        if next.name() != from {
            debug!(line = self.line, from, to = next.name(), "state transition");
        }
        Ok(next)
    }

    fn initial(&mut self, line: &str) -> RdbResult<State> {
        self.emit(format!("\n-- {}", line))?;

        match parse_directive(line) {
            Some(Directive::BeginSetup) => Ok(State::Setup { table: None }),
            Some(Directive::BeginCreate) => {
                self.begin_statement(StatementKind::Create)?;
                Ok(State::Sql { lines: Vec::new() })
            }
            Some(Directive::BeginSelect) => {
                self.begin_statement(StatementKind::Select)?;
                Ok(State::Sql { lines: Vec::new() })
            }
            Some(Directive::Include { kind, path }) => {
                self.begin_statement(kind)?;
                debug!(path, ?kind, "including SQL file");
                let content = self.resolver.load(path)?;
                self.emit_sql(&include::strip_unsupported(&content))?;
                Ok(State::Initial)
            }
            Some(Directive::BeginResult { .. }) => match self.kind.take() {
                Some(StatementKind::Select) => Ok(State::TableColumns {
                    table: SELECT_RESULT_TABLE.to_string(),
                    resume: Resume::Result,
                }),
                Some(StatementKind::Create) => Ok(State::Result { target: None }),
                None => Err(RdbUnitError::UnspecifiedStatementKind { line: self.line }),
            },
            Some(Directive::End) | None => Err(RdbUnitError::unknown(self.line, "initial", line)),
        }
    }

    fn setup(&mut self, table: Option<TableSpec>, line: &str) -> RdbResult<State> {
        if line == "END" {
            return Ok(State::Initial);
        }
        if let Some(name) = table_declaration(line) {
            return Ok(State::TableColumns {
                table: isolated_table_name(name),
                resume: Resume::Setup,
            });
        }

        let mut table = table.ok_or_else(|| RdbUnitError::missing_table(self.line, "setup"))?;
        self.add_row(&mut table, line, "setup")?;
        Ok(State::Setup { table: Some(table) })
    }

    fn sql(&mut self, mut lines: Vec<String>, line: &str) -> RdbResult<State> {
        if line == "END" {
            self.emit_sql(&lines)?;
            return Ok(State::Initial);
        }
        lines.push(line.to_string());
        Ok(State::Sql { lines })
    }

    fn table_columns(&self, table: String, resume: Resume, line: &str) -> State {
        let columns: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        match resume {
            Resume::Setup => State::Setup {
                table: Some(TableSpec::new(table, columns)),
            },
            Resume::Result => State::Result {
                target: Some(ResultTarget {
                    case_name: table,
                    expected: TableSpec::new(EXPECTED_TABLE, columns).ranked(self.ordered),
                }),
            },
        }
    }

    fn result(&mut self, target: Option<ResultTarget>, line: &str) -> RdbResult<State> {
        if line == "END" {
            let mut target =
                target.ok_or_else(|| RdbUnitError::missing_table(self.line, "result"))?;
            if !target.expected.is_created() {
                let statements = target.expected.create_empty(self.engine, self.line)?;
                self.emit_all(statements)?;
            }
            self.verdict(&target.case_name)?;
            return Ok(State::Initial);
        }
        if let Some(name) = table_declaration(line) {
            return Ok(State::TableColumns {
                table: isolated_table_name(name),
                resume: Resume::Result,
            });
        }

        let mut target = target.ok_or_else(|| RdbUnitError::missing_table(self.line, "result"))?;
        self.add_row(&mut target.expected, line, "result")?;
        Ok(State::Result {
            target: Some(target),
        })
    }

    /// Announce the reference rewriting and open the view for a SELECT.
    fn begin_statement(&mut self, kind: StatementKind) -> RdbResult<()> {
        if !self.rewriter.is_empty() {
            let comment = format!("-- Database RE: {}", self.rewriter.pattern());
            self.emit(comment)?;
        }
        if kind == StatementKind::Select {
            let drop = self.engine.drop_view(SELECT_RESULT_TABLE);
            self.emit(drop)?;
            let view = self.engine.create_view(SELECT_RESULT_TABLE);
            self.emit(view)?;
        }
        self.kind = Some(kind);
        Ok(())
    }

    fn emit_sql(&mut self, lines: &[String]) -> RdbResult<()> {
        let rewritten: Vec<String> = lines
            .iter()
            .map(|line| self.rewriter.rewrite(line).into_owned())
            .collect();
        if self.ordered {
            self.emit_all(ordered::rank_statements(&rewritten))
        } else {
            self.emit_all(rewritten)
        }
    }

    fn add_row(&mut self, table: &mut TableSpec, line: &str, state: &'static str) -> RdbResult<()> {
        let tokens = shell_split(line).map_err(|message| RdbUnitError::Tokenize {
            line: self.line,
            message,
        })?;
        let statements = table.add_row(&tokens, self.engine, self.line, state)?;
        self.emit_all(statements)
    }

    fn verdict(&mut self, case_name: &str) -> RdbResult<()> {
        let verdict = Verdict {
            number: self.test_number,
            test_name: self.test_name,
            case_name,
        };
        self.emit(verdict.assertion())?;
        self.emit_all(verdict.diagnostics(self.options.diagnostics))?;
        self.test_number += 1;
        Ok(())
    }

    fn create_database(&mut self, name: &str) -> RdbResult<()> {
        if !self.created_databases.insert(name.to_string()) {
            return Ok(());
        }
        debug!(database = name, "creating database");
        if let Some(statement) = self.engine.drop_database(name) {
            self.emit(statement)?;
        }
        let statement = self.engine.create_database(name);
        self.emit(statement)
    }

    fn emit(&mut self, statement: impl AsRef<str>) -> RdbResult<()> {
        writeln!(self.out, "{}", statement.as_ref())?;
        Ok(())
    }

    fn emit_all<I, S>(&mut self, statements: I) -> RdbResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for statement in statements {
            self.emit(statement)?;
        }
        Ok(())
    }
}
