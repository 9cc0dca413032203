use std::io::BufRead;
use std::str::FromStr;

use log::{debug, trace, warn};

use crate::error::{ParamsError, ParamsResult};
use crate::vector::ParameterVector;

const ITERATION: &str = "Iteration";
const PARAM: &str = "param";
const TO: &str = "to";

/// Largest vector the parser will grow to. Real evaluations have a few
/// thousand parameters; anything near this is a corrupt log.
pub const MAX_PARAMS: usize = 1 << 20;

/// Whether the parser wants more input after a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStatus {
    Continue,
    /// An iteration beyond the cutoff was reached; later lines are ignored.
    Stop,
}

/// Result of a parser run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOutcome {
    pub vector: ParameterVector,
    /// Last `Iteration` number at or below the cutoff.
    pub last_iteration: Option<i64>,
    /// Lines consumed, not counting the line that tripped the cutoff.
    pub lines_read: usize,
    pub stopped_early: bool,
}

/// Rebuilds a parameter vector from a tuner progress log.
///
/// Lines must be fed in their original order. A `param K` token selects
/// parameter `K`; a `(V)` token writes `V` to the selection, `to V` writes
/// `V` and ends the selection, and any `(E...)` token drops the selection
/// without writing. The selection carries over from one line to the next.
pub struct LogParser {
    cutoff: i64,
    vector: ParameterVector,
    current_param: Option<usize>,
    line_number: usize,
    last_iteration: Option<i64>,
    stopped: bool,
}

impl LogParser {
    pub fn new(cutoff: i64) -> Self {
        Self {
            cutoff,
            vector: ParameterVector::new(),
            current_param: None,
            line_number: 0,
            last_iteration: None,
            stopped: false,
        }
    }

    pub fn parse<I, S>(mut self, lines: I) -> ParamsResult<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            if self.feed_line(line.as_ref())? == LineStatus::Stop {
                break;
            }
        }

        Ok(self.finish())
    }

    pub fn parse_reader<R: BufRead>(mut self, reader: R) -> ParamsResult<ParseOutcome> {
        for line in reader.lines() {
            if self.feed_line(&line?)? == LineStatus::Stop {
                break;
            }
        }

        Ok(self.finish())
    }

    pub fn feed_line(&mut self, line: &str) -> ParamsResult<LineStatus> {
        if self.stopped {
            return Ok(LineStatus::Stop);
        }

        let line_number = self.line_number + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.first() == Some(&ITERATION) {
            let iteration: i64 = number_after(&tokens, 0, line_number)?;
            if iteration > self.cutoff {
                debug!(
                    "Iteration {} on line {} is past cutoff {}, stopping",
                    iteration, line_number, self.cutoff
                );
                self.stopped = true;
                return Ok(LineStatus::Stop);
            }
            self.last_iteration = Some(iteration);
        }

        self.line_number = line_number;

        for (i, &token) in tokens.iter().enumerate() {
            if token == PARAM {
                let index: usize = number_after(&tokens, i, line_number)?;
                if index >= MAX_PARAMS {
                    return Err(ParamsError::ParamIndexTooLarge {
                        line: line_number,
                        index,
                    });
                }
                self.current_param = Some(index);
                self.vector.grow_to(index + 1);
            }

            match (token, self.current_param) {
                (t, _) if t.starts_with("(E") => self.current_param = None,
                (t, Some(index)) if t.starts_with('(') => {
                    let value: i32 = parse_number(strip_parens(t), line_number)?;
                    trace!("param {} candidate {}", index, value);
                    self.vector.set(index, value);
                }
                (TO, Some(index)) => {
                    let value: i32 = number_after(&tokens, i, line_number)?;
                    trace!("param {} set to {}", index, value);
                    self.vector.set(index, value);
                    self.current_param = None;
                }
                _ => {}
            }
        }

        Ok(LineStatus::Continue)
    }

    pub fn finish(self) -> ParseOutcome {
        if self.line_number > 0 && self.last_iteration.is_none() {
            warn!("No iteration at or below {} found in log", self.cutoff);
        }

        ParseOutcome {
            vector: self.vector,
            last_iteration: self.last_iteration,
            lines_read: self.line_number,
            stopped_early: self.stopped,
        }
    }
}

/// Parses `lines` up to and including iteration `cutoff`.
pub fn parse<I, S>(lines: I, cutoff: i64) -> ParamsResult<ParameterVector>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(LogParser::new(cutoff).parse(lines)?.vector)
}

fn number_after<T: FromStr>(tokens: &[&str], marker: usize, line: usize) -> ParamsResult<T> {
    let token = tokens
        .get(marker + 1)
        .ok_or_else(|| ParamsError::MissingNumber {
            line,
            after: marker_name(tokens[marker]),
        })?;
    parse_number(token, line)
}

fn parse_number<T: FromStr>(token: &str, line: usize) -> ParamsResult<T> {
    token.parse().map_err(|_| ParamsError::MalformedNumber {
        line,
        token: token.to_string(),
    })
}

fn marker_name(token: &str) -> &'static str {
    match token {
        ITERATION => ITERATION,
        PARAM => PARAM,
        _ => TO,
    }
}

// "(123)" -> "123": drops the opening paren and whatever single character closes it
fn strip_parens(token: &str) -> &str {
    let mut chars = token[1..].chars();
    chars.next_back();
    chars.as_str()
}
