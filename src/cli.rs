//! Command-line modes.

pub const USAGE: &str = "\
tempcast - regional temperature forecast store

Usage:
    tempcast [fetch]           Fetch the forecast and write it to the database
    tempcast regions           List stored regions
    tempcast dump <region>     Print all stored days for a region
    tempcast summary <region>  Print the date span and temperature range for a region

Environment:
    CWA_TOKEN   CWA open-data authorization token (required for fetch)
    RUST_LOG    Log filter, default \"info\"";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch,
    Regions,
    Dump(String),
    Summary(String),
    /// Unknown mode; print usage and exit successfully
    Usage,
}

/// A mode that needs a region was given none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRegion(pub &'static str);

impl Command {
    /// Interpret arguments after the program name.
    pub fn parse(args: &[String]) -> Result<Self, MissingRegion> {
        let region = || args.get(1).filter(|r| !r.trim().is_empty()).cloned();

        match args.first().map(String::as_str) {
            None | Some("fetch") => Ok(Command::Fetch),
            Some("regions") => Ok(Command::Regions),
            Some("dump") => region().map(Command::Dump).ok_or(MissingRegion("dump")),
            Some("summary") => region()
                .map(Command::Summary)
                .ok_or(MissingRegion("summary")),
            Some(_) => Ok(Command::Usage),
        }
    }
}
