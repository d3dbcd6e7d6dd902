use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use pprkit_io_xlsx::{
    EnumSessionCommand, PprSession, SpecExportOptions, SpecSessionOptions, SpecSessionOutcome,
};
use tracing::{debug, error};

use crate::application::repl::{C_REPL_HELP, convert_line_to_position, run_edit_loop};
use crate::presentation::render::{render_records_table, render_status};

fn build_session(out_dir: PathBuf, no_clobber: bool) -> PprSession {
    PprSession::new(SpecSessionOptions {
        export: SpecExportOptions {
            dir_output: out_dir,
            if_overwrite: !no_clobber,
        },
    })
}

fn print_outcome(outcome: &SpecSessionOutcome) {
    if outcome.is_failure() {
        eprintln!("{}", render_status(&outcome.status));
    } else {
        println!("{}", render_status(&outcome.status));
    }
}

/// Load `file` and apply `--delete` as a single batch.
fn load_and_prune(
    session: &mut PprSession,
    file: PathBuf,
    delete_lines: &[usize],
) -> Result<(), ExitCode> {
    let outcome = session.handle(EnumSessionCommand::LoadPath(file));
    print_outcome(&outcome);
    if outcome.is_failure() {
        return Err(ExitCode::FAILURE);
    }

    if delete_lines.is_empty() {
        return Ok(());
    }
    let l_positions = delete_lines
        .iter()
        .map(|&n_line| convert_line_to_position(n_line))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|msg| {
            eprintln!("[danger] {msg}");
            ExitCode::FAILURE
        })?;
    debug!(positions = ?l_positions, "applying --delete");

    let outcome = session.handle(EnumSessionCommand::DeleteMany(l_positions));
    print_outcome(&outcome);
    if outcome.is_failure() {
        return Err(ExitCode::FAILURE);
    }
    Ok(())
}

pub fn handle_preview(file: PathBuf, delete_lines: Vec<usize>) -> ExitCode {
    let mut session = PprSession::default();
    if let Err(code) = load_and_prune(&mut session, file, &delete_lines) {
        return code;
    }
    println!("{}", render_records_table(session.records()));
    ExitCode::SUCCESS
}

pub fn handle_convert(
    file: PathBuf,
    delete_lines: Vec<usize>,
    out_dir: PathBuf,
    no_clobber: bool,
) -> ExitCode {
    let mut session = build_session(out_dir, no_clobber);
    if let Err(code) = load_and_prune(&mut session, file, &delete_lines) {
        return code;
    }

    let outcome = session.handle(EnumSessionCommand::Export);
    print_outcome(&outcome);
    match outcome.path_file_out {
        Some(path_file_out) => {
            println!("{}", path_file_out.display());
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}

pub fn handle_edit(file: Option<PathBuf>, out_dir: PathBuf, no_clobber: bool) -> ExitCode {
    let mut session = build_session(out_dir, no_clobber);

    if let Some(file) = file {
        let outcome = session.handle(EnumSessionCommand::LoadPath(file));
        print_outcome(&outcome);
        println!("{}", render_records_table(session.records()));
    }
    println!("{C_REPL_HELP}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match run_edit_loop(&mut session, stdin.lock(), &mut stdout) {
        Ok(()) => {
            let _ = stdout.flush();
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "interactive session aborted");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use rust_xlsxwriter::Workbook;

    use super::*;

    static N_SEQ_TEST_DIR: AtomicUsize = AtomicUsize::new(0);

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new(prefix: &str) -> Self {
            let n_nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let n_seq = N_SEQ_TEST_DIR.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!(
                "pprkit_cli_{prefix}_{}_{n_nanos}_{n_seq}",
                std::process::id()
            ));
            fs::create_dir_all(&path).expect("create test dir");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    fn write_orders_xlsx(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Reference").expect("write");
        sheet.write_string(0, 2, "ISBN").expect("write");
        for n_row in 1..=3u32 {
            sheet.write_string(n_row, 0, "ORD7").expect("write");
            sheet
                .write_string(n_row, 2, format!("978000000000{n_row}"))
                .expect("write");
        }
        workbook.save(path).expect("save");
    }

    #[test]
    fn convert_writes_ppr_after_deleting_lines() {
        let dir = TestDir::new("convert");
        let path_xlsx = dir.path().join("orders.xlsx");
        write_orders_xlsx(&path_xlsx);
        let dir_out = dir.path().join("out");

        let code = handle_convert(path_xlsx, vec![2], dir_out.clone(), false);
        assert_eq!(code, ExitCode::SUCCESS);

        let txt = fs::read_to_string(dir_out.join("T1.MORD7.PPR")).expect("read");
        assert_eq!(
            txt,
            "ORD7,00001,9780000000001,AR,OK\nORD7,00002,9780000000003,AR,OK"
        );
    }

    #[test]
    fn convert_rejects_line_zero_and_missing_lines() {
        let dir = TestDir::new("bad_lines");
        let path_xlsx = dir.path().join("orders.xlsx");
        write_orders_xlsx(&path_xlsx);
        let dir_out = dir.path().join("out");

        let code = handle_convert(path_xlsx.clone(), vec![0], dir_out.clone(), false);
        assert_eq!(code, ExitCode::FAILURE);
        let code = handle_convert(path_xlsx, vec![1, 9], dir_out.clone(), false);
        assert_eq!(code, ExitCode::FAILURE);
        assert!(!dir_out.join("T1.MORD7.PPR").exists());
    }

    #[test]
    fn convert_fails_on_missing_file() {
        let dir = TestDir::new("missing");
        let code = handle_convert(
            dir.path().join("nope.xlsx"),
            Vec::new(),
            dir.path().to_path_buf(),
            false,
        );
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn convert_no_clobber_keeps_existing_file() {
        let dir = TestDir::new("no_clobber");
        let path_xlsx = dir.path().join("orders.xlsx");
        write_orders_xlsx(&path_xlsx);
        let path_ppr = dir.path().join("T1.MORD7.PPR");
        fs::write(&path_ppr, "old").expect("seed");

        let code = handle_convert(path_xlsx, Vec::new(), dir.path().to_path_buf(), true);
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(fs::read_to_string(&path_ppr).expect("read"), "old");
    }
}
