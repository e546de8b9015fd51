use crate::{Operation, Rule, RuleShape, debug_ignore};

/// Result of asking one rule about one path, as seen by the precedence passes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Evaluation {
    pub(crate) operation: Operation,
    pub(crate) directory: bool,
}

impl Evaluation {
    pub(crate) fn of(rule: &Rule, relative_path: &str) -> Self {
        let operation = rule.evaluate(relative_path);
        debug_ignore::trace_rule_evaluate(relative_path, rule.pattern(), operation);
        Self {
            operation,
            directory: rule.shape() == RuleShape::Directory,
        }
    }
}

/// Flags accumulated by the exclusion pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ExclusionState {
    pub(crate) excluded: bool,
    pub(crate) directory_excluded: bool,
}

/// Evaluates rules lazily so that the passes decide how far to iterate.
pub(crate) fn evaluations<'a>(
    rules: &'a [Rule],
    relative_path: &'a str,
) -> impl Iterator<Item = Evaluation> + 'a {
    rules
        .iter()
        .map(move |rule| Evaluation::of(rule, relative_path))
}

/// Consumes every exclusion evaluation unless one terminates the pass.
///
/// Both flags are sticky. An exclusion by a directory rule is recorded even
/// when an earlier rule already excluded the path. A terminating evaluation
/// ends the pass without touching either flag.
pub(crate) fn exclusion_pass<I>(evaluations: I) -> ExclusionState
where
    I: IntoIterator<Item = Evaluation>,
{
    let mut state = ExclusionState::default();
    for evaluation in evaluations {
        match evaluation.operation {
            Operation::Exclude => {
                state.excluded = true;
                state.directory_excluded |= evaluation.directory;
            }
            Operation::ExcludeAndTerminate => break,
            Operation::Include | Operation::Noop => {}
        }
    }
    state
}

/// Looks for the first inclusion that may lift the exclusion in `state`.
///
/// Returns `true` when the path stays excluded. A directory-sourced exclusion
/// is only lifted by a directory-shaped inclusion.
pub(crate) fn inclusion_pass<I>(state: ExclusionState, evaluations: I) -> bool
where
    I: IntoIterator<Item = Evaluation>,
{
    if !state.excluded {
        return false;
    }
    let lifted = evaluations.into_iter().any(|evaluation| {
        evaluation.operation == Operation::Include
            && (evaluation.directory || !state.directory_excluded)
    });
    !lifted
}

/// Runs both passes and returns `true` when `relative_path` is excluded.
pub(crate) fn is_excluded(exclusions: &[Rule], inclusions: &[Rule], relative_path: &str) -> bool {
    let state = exclusion_pass(evaluations(exclusions, relative_path));
    inclusion_pass(state, evaluations(inclusions, relative_path))
}
