//! The l_system module provides a small Lindenmayer rewriting engine. The
//! strings it produces are meant to be walked by
//! [`crate::turtle::GridTurtle::walk_lpath`], which treats `F` as a step and
//! `-`/`+` as left/right quarter turns.

use std::collections::HashMap;

/// # LSystem
///
/// An axiom plus a rewrite rule per symbol. Symbols without a rule (turns,
/// `F` in most systems) are copied through unchanged.
///
/// # Example
///
/// ```rust
/// use aoer_fractals::l_system::LSystem;
/// use aoer_fractals::turtle::GridTurtle;
///
/// let trail = GridTurtle::new()
///     .walk_lpath(&LSystem::hilbert().expand(2))
///     .into_trail();
/// assert_eq!(trail.len(), 16);
/// ```
#[derive(Clone, Debug)]
pub struct LSystem {
    pub axiom: String,
    pub rules: HashMap<char, String>,
}

impl LSystem {
    /// Hilbert curve: each expansion quadruples the number of `F` steps,
    /// `4^order - 1` of them at a given order.
    pub fn hilbert() -> LSystem {
        LSystem {
            axiom: "A".to_string(),
            rules: HashMap::from([
                ('A', "+BF-AFA-FB+".to_string()),
                ('B', "-AF+BFB+FA-".to_string()),
            ]),
        }
    }

    /// Heighway dragon: `2^order` `F` steps at a given order.
    pub fn dragon() -> LSystem {
        LSystem {
            axiom: "FX".to_string(),
            rules: HashMap::from([
                ('X', "X+YF+".to_string()),
                ('Y', "-FX-Y".to_string()),
            ]),
        }
    }

    fn rewrite(&self, state: &str) -> String {
        let mut next = String::with_capacity(state.len() * 2);
        for c in state.chars() {
            match self.rules.get(&c) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(c),
            }
        }
        next
    }

    /// #expand
    ///
    /// Expands the L-system by the requested "order" of iterations. Returns a string
    /// representing the state of the L-system. Useful with
    /// [`crate::turtle::GridTurtle::walk_lpath`]
    pub fn expand(&self, order: u32) -> String {
        (0..order).fold(self.axiom.clone(), |state, _| self.rewrite(&state))
    }
}
