/**
 * prompt.rs
 * Operator input for namespaces missing from the prefix table
 */

use std::io::{self, BufRead, Write};

use crate::errors::{Result, SmwError};

/// Supplies a prefix for a namespace the table cannot resolve.
///
/// Called synchronously; the run blocks until a prefix is returned.
pub trait PrefixResolver {
    fn resolve_unknown(&mut self, namespace: &str) -> Result<String>;
}

impl<F> PrefixResolver for F
where
    F: FnMut(&str) -> String,
{
    fn resolve_unknown(&mut self, namespace: &str) -> Result<String> {
        Ok(self(namespace))
    }
}

/// Asks the operator on a terminal-like stream pair
pub struct InteractivePrefixResolver<R, W> {
    input: R,
    output: W,
}

impl InteractivePrefixResolver<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractivePrefixResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> PrefixResolver for InteractivePrefixResolver<R, W> {
    fn resolve_unknown(&mut self, namespace: &str) -> Result<String> {
        loop {
            write!(
                self.output,
                "\n\nThe prefix to Namespace {} CANNOT be found.\nPlease provide it: ",
                namespace
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SmwError::Prompt(format!(
                    "input closed before a prefix was given for {}",
                    namespace
                )));
            }

            let prefix = line.trim();
            if !prefix.is_empty() {
                return Ok(prefix.to_string());
            }
        }
    }
}
