use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use pprkit_io_xlsx::{EnumSessionCommand, PprSession};

use crate::presentation::render::{render_records_table, render_status};

pub const C_REPL_HELP: &str = "\
commands:
  load <path>            load the first sheet of a spreadsheet
  list                   show current records
  delete <line>          delete one record by line number
  delete <line> <line>.. delete several records at once
  clear                  drop all records
  export [dir]           write the PPR file
  help                   show this help
  quit                   leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumReplCommand {
    Session(EnumSessionCommand),
    List,
    Help,
    Quit,
}

/// Convert a 1-based line number to a store position.
pub fn convert_line_to_position(line: usize) -> Result<usize, String> {
    line.checked_sub(1)
        .ok_or_else(|| "Line numbers start at 1".to_string())
}

fn parse_line_number(token: &str) -> Result<usize, String> {
    let line = token
        .parse::<usize>()
        .map_err(|_| format!("Not a line number: {token:?}"))?;
    convert_line_to_position(line)
}

/// Parse one input line; blank lines yield `None`.
pub fn parse_repl_line(line: &str) -> Result<Option<EnumReplCommand>, String> {
    let mut it_tokens = line.split_whitespace();
    let Some(c_verb) = it_tokens.next() else {
        return Ok(None);
    };
    let l_args: Vec<&str> = it_tokens.collect();

    let command = match (c_verb, l_args.as_slice()) {
        ("load", []) => return Err("usage: load <path>".to_string()),
        ("load", _) => {
            let c_path = line.trim_start()["load".len()..].trim();
            EnumReplCommand::Session(EnumSessionCommand::LoadPath(PathBuf::from(c_path)))
        }
        ("list" | "ls", []) => EnumReplCommand::List,
        ("delete" | "rm", []) => return Err("usage: delete <line> [<line>...]".to_string()),
        ("delete" | "rm", [c_line]) => {
            EnumReplCommand::Session(EnumSessionCommand::DeleteAt(parse_line_number(c_line)?))
        }
        ("delete" | "rm", l_lines) => {
            let l_positions = l_lines
                .iter()
                .map(|c_line| parse_line_number(c_line))
                .collect::<Result<Vec<_>, _>>()?;
            EnumReplCommand::Session(EnumSessionCommand::DeleteMany(l_positions))
        }
        ("clear", []) => EnumReplCommand::Session(EnumSessionCommand::Clear),
        ("export", []) => EnumReplCommand::Session(EnumSessionCommand::Export),
        ("export", [c_dir]) => {
            EnumReplCommand::Session(EnumSessionCommand::ExportTo(PathBuf::from(c_dir)))
        }
        ("help" | "?", _) => EnumReplCommand::Help,
        ("quit" | "exit" | "q", []) => EnumReplCommand::Quit,
        _ => return Err(format!("Unknown command: {}", line.trim())),
    };
    Ok(Some(command))
}

/// Drive `session` from `input` until EOF or `quit`.
pub fn run_edit_loop<R, W>(session: &mut PprSession, input: R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_repl_line(&line) {
            Ok(None) => {}
            Ok(Some(EnumReplCommand::Quit)) => break,
            Ok(Some(EnumReplCommand::Help)) => writeln!(output, "{C_REPL_HELP}")?,
            Ok(Some(EnumReplCommand::List)) => {
                writeln!(output, "{}", render_records_table(session.records()))?
            }
            Ok(Some(EnumReplCommand::Session(command))) => {
                let if_mutation = !matches!(
                    command,
                    EnumSessionCommand::Export | EnumSessionCommand::ExportTo(_)
                );
                let outcome = session.handle(command);
                writeln!(output, "{}", render_status(&outcome.status))?;
                if let Some(path_file_out) = &outcome.path_file_out {
                    writeln!(output, "{}", path_file_out.display())?;
                }
                if if_mutation && !outcome.is_failure() {
                    writeln!(output, "{}", render_records_table(&outcome.snapshot.records))?;
                }
            }
            Err(msg) => writeln!(output, "[warning] {msg}")?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}
