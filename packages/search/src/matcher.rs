//! The path matcher.
//!
//! Patterns are dotted paths whose segments are literal node names or
//! the wildcard `*`. Matching is a depth-first pre-order walk bounded
//! at each level by the segment in focus. All matcher state lives in a
//! per-call context; the tree is only ever read.
//!
//! Wildcard levels match speculatively: a node that ends descent under
//! a `*` segment is recorded at once, but the record only survives if
//! the remaining pattern bottoms out somewhere beneath that wildcard.
//! On backtrack, a wildcard level whose subtree confirmed nothing
//! retracts its tentative record again.

use vsstree_tree::{NodeHandle, Tree, Validation};

/// Depth limit used when a pattern may match at any depth.
const ANY_DEPTH_LIMIT: usize = 100;

/// Per-call search configuration.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Stop recording matches once this many are held.
    pub max_found: usize,
    /// Ignore the pattern's segment count as the depth limit and allow
    /// a trailing wildcard to match at any depth below the literal
    /// prefix.
    pub any_depth: bool,
    /// Record only leaf-kind nodes.
    pub leaf_only: bool,
    /// Exclusion scopes: accumulated match paths at which descent
    /// stops even when the node otherwise matches.
    pub no_scope: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_found: usize::MAX,
            any_depth: false,
            leaf_only: false,
            no_scope: Vec::new(),
        }
    }
}

/// One matched node with its reconstructed dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub path: String,
    pub node: NodeHandle,
}

/// Outcome of one matcher invocation.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Matches in traversal (pre-) order.
    pub matches: Vec<Match>,
    /// All visited-and-matched nodes' validation levels combined under
    /// the precedence matrix, recorded or not.
    pub max_validation: Validation,
}

struct SearchContext<'a> {
    segments: Vec<String>,
    wildcard_tail: bool,
    match_path: String,
    current_depth: usize,
    max_depth: usize,
    max_found: usize,
    leaf_only: bool,
    /// One counter per active wildcard level, counting records made
    /// while that level is in focus.
    speculation: Vec<usize>,
    matches: Vec<Match>,
    max_validation: Validation,
    no_scope: &'a [String],
}

impl SearchContext<'_> {
    /// Pattern segment in focus `offset` levels below the current one.
    ///
    /// Past the end of the pattern this keeps yielding `*` while the
    /// pattern has a wildcard tail and the depth limit is not reached;
    /// this is the infinite-wildcard-tail rule that makes
    /// "everything under here" queries work. Otherwise the empty
    /// segment is returned, which matches nothing.
    fn segment(&self, offset: usize) -> &str {
        let index = match (self.current_depth + offset).checked_sub(1) {
            Some(index) => index,
            None => return "",
        };
        match self.segments.get(index) {
            Some(segment) => segment,
            None => {
                if self.wildcard_tail && self.current_depth < self.max_depth {
                    "*"
                } else {
                    ""
                }
            }
        }
    }

    fn push_path_segment(&mut self, name: &str) {
        if self.current_depth > 0 {
            self.match_path.push('.');
        }
        self.match_path.push_str(name);
    }

    fn pop_path_segment(&mut self) {
        match self.match_path.rfind('.') {
            Some(dot) => self.match_path.truncate(dot),
            None => self.match_path.clear(),
        }
    }

    fn inc_depth(&mut self, name: &str) {
        self.push_path_segment(name);
        self.current_depth += 1;
    }

    fn is_end_of_scope(&self) -> bool {
        self.no_scope.iter().any(|path| *path == self.match_path)
    }
}

fn name_matches(name: &str, segment: &str) -> bool {
    segment == "*" || name == segment
}

/// Run a pattern over the subtree rooted at `root`.
///
/// The root's own name is matched against the pattern's first segment.
pub fn search(
    tree: &Tree,
    root: NodeHandle,
    pattern: &str,
    options: &SearchOptions,
) -> SearchResult {
    let segments: Vec<String> = if pattern.is_empty() {
        Vec::new()
    } else {
        pattern.split('.').map(str::to_string).collect()
    };
    let max_depth = if options.any_depth {
        ANY_DEPTH_LIMIT
    } else {
        segments.len()
    };
    let mut ctx = SearchContext {
        segments,
        wildcard_tail: pattern.ends_with('*'),
        match_path: String::new(),
        current_depth: 0,
        max_depth,
        max_found: options.max_found,
        leaf_only: options.leaf_only,
        speculation: Vec::new(),
        matches: Vec::new(),
        max_validation: Validation::None,
        no_scope: &options.no_scope,
    };
    traverse(tree, &mut ctx, root);
    SearchResult {
        matches: ctx.matches,
        max_validation: ctx.max_validation,
    }
}

fn traverse(tree: &Tree, ctx: &mut SearchContext, node: NodeHandle) -> usize {
    ctx.inc_depth(tree.name(node));
    let mut succeeded = 0;
    if name_matches(tree.name(node), ctx.segment(0)) {
        let (confirmed, done) = save_matching_node(tree, ctx, node);
        succeeded = confirmed;
        if !done {
            let child_segment = ctx.segment(1).to_string();
            for &child in tree.children(node) {
                if name_matches(tree.name(child), &child_segment) {
                    succeeded += traverse(tree, ctx, child);
                }
            }
        }
    }
    dec_depth(ctx, succeeded);
    succeeded
}

/// Handle a node whose name satisfies the segment in focus.
///
/// Returns `(confirmed, done)`: `confirmed` is 1 when this node
/// satisfies the pattern's full length under an active wildcard (which
/// shields tentative records above it from retraction), and `done`
/// means descent ends here (no children, depth limit, or the match
/// path hit an exclusion scope).
fn save_matching_node(tree: &Tree, ctx: &mut SearchContext, node: NodeHandle) -> (usize, bool) {
    if ctx.segment(0) == "*" {
        ctx.speculation.push(0);
    }
    ctx.max_validation = tree.validation(node).combine(ctx.max_validation);

    let child_count = tree.children(node).len();
    let done =
        child_count == 0 || ctx.current_depth == ctx.max_depth || ctx.is_end_of_scope();

    // Only nodes at which descent ends are candidate matches; the
    // pattern's inner segments steer the walk without producing
    // results of their own.
    if done
        && (!tree.kind(node).is_branch_like() || !ctx.leaf_only)
        && ctx.matches.len() < ctx.max_found
    {
        ctx.matches.push(Match {
            path: ctx.match_path.clone(),
            node,
        });
        if let Some(top) = ctx.speculation.last_mut() {
            *top += 1;
        }
    }

    let confirmed = !ctx.speculation.is_empty()
        && ((child_count == 0 && ctx.current_depth >= ctx.segments.len())
            || ctx.current_depth == ctx.max_depth);
    (confirmed as usize, done)
}

/// Reverse failed speculative matches and step back up one level.
fn dec_depth(ctx: &mut SearchContext, succeeded: usize) {
    if succeeded == 0 {
        if let Some(top) = ctx.speculation.last_mut() {
            if *top > 0 {
                *top -= 1;
                ctx.matches.pop();
            }
        }
    }
    if ctx.segment(0) == "*" {
        ctx.speculation.pop();
    }
    ctx.pop_path_segment();
    ctx.current_depth -= 1;
}
