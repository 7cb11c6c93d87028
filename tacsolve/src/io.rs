use clap::Args;
use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Read, Write, stdin, stdout},
    path::PathBuf,
    str::FromStr,
};
use tac_core::models::SolveInput;
use tac_solver::{
    Solution,
    io::{read_request, write_report},
};
use tracing::{Level, event};

/// Where the solve request comes from and where the report goes.
#[derive(Args, Debug)]
pub struct IOArgs {
    /// The solve request JSON file ("-" implies stdin)
    #[arg(value_parser = clap::value_parser!(Endpoint))]
    input: Endpoint,

    /// The report file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(Endpoint))]
    output: Endpoint,
}

impl IOArgs {
    /// Reads and parses the solve request
    pub fn request(&self) -> anyhow::Result<SolveInput> {
        let reader: Box<dyn Read> = match &self.input {
            Endpoint::File(path) => Box::new(BufReader::new(File::open(path)?)),
            Endpoint::Std => Box::new(stdin().lock()),
        };
        let request = read_request(reader)?;
        event!(Level::DEBUG, from = %self.input, "read solve request");
        Ok(request)
    }

    /// Writes the JSON report of a finished solve
    pub fn report(&self, solution: &Solution) -> anyhow::Result<()> {
        let writer: Box<dyn Write> = match &self.output {
            Endpoint::File(path) => Box::new(BufWriter::new(File::create(path)?)),
            Endpoint::Std => Box::new(stdout().lock()),
        };
        write_report(writer, solution)?;
        event!(Level::DEBUG, to = %self.output, "wrote report");
        Ok(())
    }
}

/// A file, or the standard stream when given as "-"
#[derive(Clone, Debug, PartialEq, Eq)]
enum Endpoint {
    File(PathBuf),
    Std,
}

impl FromStr for Endpoint {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Self::Std),
            path => Ok(Self::File(path.parse()?)),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Std => f.write_str("standard stream"),
        }
    }
}
