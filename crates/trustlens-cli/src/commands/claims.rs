//! Claims command implementation.

use crate::cli::ResultArgs;
use crate::commands::load_result;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the claims command.
pub fn execute_claims(args: ResultArgs, formatter: &Formatter) -> Result<String> {
    let result = load_result(&args.result)?;
    formatter.format_claims(&result)
}
