//! Test-case parsing.
//!
//! Input is a stream of whitespace-separated tokens, line breaks carry no
//! meaning:
//!
//! ```text
//! T
//! N M          (repeated T times, followed by)
//! u v [w]      (M edges, w only with --weighted)
//! S
//! ```
//!
//! Nodes are the integers `1..=N`, named by their decimal form.

use crate::config::Settings;
use crate::error::CliError;

/// Upper bound on preallocation from counts read off the input. Counts are
/// untrusted; vectors grow past this as real tokens arrive.
const CAPACITY_HINT_MAX: usize = 1024;

/// An edge as read from input. Endpoints may name nodes outside `1..=N`;
/// the graph rejects those when the case is built.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// 1-based position in the batch.
    pub index: usize,
    pub node_count: usize,
    pub edges: Vec<EdgeSpec>,
    pub source: String,
}

impl TestCase {
    /// Node names in registration order.
    pub fn node_names(&self) -> impl Iterator<Item = String> {
        (1..=self.node_count).map(|n| n.to_string())
    }
}

/// Whitespace tokenizer that remembers line numbers for error messages.
struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let inner = text
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok)));
        Self {
            inner: Box::new(inner),
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<(usize, &'a str), CliError> {
        self.inner
            .next()
            .ok_or(CliError::UnexpectedEof { expected })
    }

    fn count(&mut self, expected: &'static str) -> Result<usize, CliError> {
        let (line, tok) = self.next(expected)?;
        tok.parse::<usize>()
            .map_err(|_| CliError::invalid_token(line, expected, tok))
    }

    /// Node tokens are normalized through integer parsing so "007" names node "7".
    fn node(&mut self, expected: &'static str) -> Result<String, CliError> {
        let (line, tok) = self.next(expected)?;
        tok.parse::<u64>()
            .map(|n| n.to_string())
            .map_err(|_| CliError::invalid_token(line, expected, tok))
    }

    fn cost(&mut self) -> Result<f64, CliError> {
        let (line, tok) = self.next("edge cost")?;
        match tok.parse::<f64>() {
            Ok(cost) if cost.is_finite() && cost >= 0.0 => Ok(cost),
            _ => Err(CliError::invalid_token(
                line,
                "a non-negative edge cost",
                tok,
            )),
        }
    }

    fn rest(&mut self) -> Option<(usize, &'a str)> {
        self.inner.next()
    }
}

/// Parse a whole batch. Any malformed token aborts the batch.
pub fn parse_batch(text: &str, settings: &Settings) -> Result<Vec<TestCase>, CliError> {
    let mut tokens = Tokens::new(text);
    let case_count = tokens.count("test case count")?;

    let mut cases = Vec::with_capacity(case_count.min(CAPACITY_HINT_MAX));
    for index in 1..=case_count {
        let node_count = tokens.count("node count")?;
        let edge_count = tokens.count("edge count")?;

        let mut edges = Vec::with_capacity(edge_count.min(CAPACITY_HINT_MAX));
        for _ in 0..edge_count {
            let from = tokens.node("edge endpoint")?;
            let to = tokens.node("edge endpoint")?;
            let cost = if settings.weighted {
                tokens.cost()?
            } else {
                settings.edge_cost
            };
            edges.push(EdgeSpec { from, to, cost });
        }

        let source = tokens.node("source node")?;
        cases.push(TestCase {
            index,
            node_count,
            edges,
            source,
        });
    }

    if let Some((line, tok)) = tokens.rest() {
        tracing::warn!(line, token = tok, "ignoring input after the last test case");
    }

    Ok(cases)
}
