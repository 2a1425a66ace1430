use clap::Parser;
use std::path::PathBuf;

use crate::crack::DEFAULT_ALPHABET;

#[derive(Parser, Debug)]
#[command(name = "zipcrack")]
#[command(version)]
#[command(about = "Parallel password recovery for ZipCrypto-encrypted ZIP entries", long_about = None)]
#[command(after_help = "Examples:\n  \
  zipcrack -l storage.zip                      list entries and encryption status\n  \
  zipcrack storage.zip                         crack the first encrypted entry\n  \
  zipcrack -n 6 -c abc123 storage.zip key.txt  length 6 over a custom alphabet")]
pub struct Cli {
    /// Encrypted ZIP archive path
    #[arg(value_name = "FILE")]
    pub archive: String,

    /// Target entry name (default: first encrypted entry)
    #[arg(value_name = "ENTRY")]
    pub entry: Option<String>,

    /// List entries and exit
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Candidate password length
    #[arg(short = 'n', long = "length", value_name = "LEN", default_value_t = 5)]
    pub length: usize,

    /// Alphabet to enumerate, in order
    #[arg(short = 'c', long = "charset", value_name = "SET", default_value = DEFAULT_ALPHABET)]
    pub charset: String,

    /// File the recovered password is written to
    #[arg(long = "password-out", value_name = "FILE", default_value = "password.txt")]
    pub password_out: PathBuf,

    /// File the decrypted entry content is written to
    #[arg(
        long = "content-out",
        value_name = "FILE",
        default_value = "decrypted_content.txt"
    )]
    pub content_out: PathBuf,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }
}
