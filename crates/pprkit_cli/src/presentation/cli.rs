use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Spreadsheet to PPR export converter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the normalized records of a spreadsheet
    Preview {
        file: PathBuf,
        /// Line numbers to drop before printing (comma-separated or repeated)
        #[arg(long = "delete", value_delimiter = ',')]
        delete_lines: Vec<usize>,
    },

    /// Convert a spreadsheet into a T1.M<reference>.PPR file
    Convert {
        file: PathBuf,
        /// Line numbers to drop before export (comma-separated or repeated)
        #[arg(long = "delete", value_delimiter = ',')]
        delete_lines: Vec<usize>,
        /// Directory the PPR file is written into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Fail instead of replacing an existing PPR file
        #[arg(long)]
        no_clobber: bool,
    },

    /// Interactive session: load, inspect, delete rows, export
    Edit {
        /// Spreadsheet to load on start
        file: Option<PathBuf>,
        /// Default directory for `export`
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Fail instead of replacing an existing PPR file
        #[arg(long)]
        no_clobber: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_accepts_comma_separated_deletes() {
        let cli = Cli::try_parse_from([
            "pprkit",
            "convert",
            "orders.xlsx",
            "--delete",
            "2,4",
            "--delete",
            "7",
            "--no-clobber",
        ])
        .expect("parse");

        match cli.command {
            Commands::Convert {
                file,
                delete_lines,
                out_dir,
                no_clobber,
            } => {
                assert_eq!(file, PathBuf::from("orders.xlsx"));
                assert_eq!(delete_lines, vec![2, 4, 7]);
                assert_eq!(out_dir, PathBuf::from("."));
                assert!(no_clobber);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn edit_file_is_optional() {
        let cli = Cli::try_parse_from(["pprkit", "edit"]).expect("parse");
        assert!(matches!(cli.command, Commands::Edit { file: None, .. }));
    }
}
