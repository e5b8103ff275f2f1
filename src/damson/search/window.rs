use crate::*;

/*----------------------------------------------------------------*/

pub const ASPIRATION_MARGIN: i32 = 50;

/// An alpha-beta window. Iterations after the first open a narrow window
/// around the previous score and fall back to the full one on a miss.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Window {
    pub alpha: Score,
    pub beta: Score,
}

impl Window {
    pub const FULL: Window = Window {
        alpha: Score(-Score::INFINITE.0),
        beta: Score::INFINITE,
    };

    #[inline]
    pub fn around(score: Score) -> Window {
        // Mate scores make narrow windows meaningless.
        if score.is_mate() {
            return Window::FULL;
        }

        Window {
            alpha: score - ASPIRATION_MARGIN,
            beta: score + ASPIRATION_MARGIN,
        }
    }

    /// Whether a result is exact for this window rather than a bound.
    #[inline]
    pub fn contains(self, score: Score) -> bool {
        score > self.alpha && score < self.beta
    }

    #[inline]
    pub fn is_full(self) -> bool {
        self == Window::FULL
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_window_brackets_the_score() {
        let w = Window::around(Score(30));

        assert_eq!(w.alpha, Score(-20));
        assert_eq!(w.beta, Score(80));
        assert!(w.contains(Score(30)));
        assert!(!w.contains(Score(-20)));
        assert!(!w.contains(Score(100)));
    }

    #[test]
    fn mate_scores_get_the_full_window() {
        assert!(Window::around(Score::mate(5)).is_full());
        assert!(Window::FULL.contains(Score::mate(5)));
    }
}
