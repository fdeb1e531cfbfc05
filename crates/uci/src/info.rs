//! UCI info command types.

/// Score in centipawns or mate distance, from the side to move's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawn score (100 = 1 pawn advantage).
    Cp(i32),
    /// Mate in N moves (positive = engine winning, negative = engine losing).
    Mate(i32),
}

/// Search information from engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineInfo {
    /// Search depth in plies.
    pub depth: Option<u32>,
    /// Score evaluation.
    pub score: Option<Score>,
    /// Nodes searched.
    pub nodes: Option<u64>,
    /// Principal variation (best line found).
    pub pv: Vec<String>,
    /// Arbitrary string info.
    pub string: Option<String>,
}

impl EngineInfo {
    /// Format as UCI info string.
    pub fn to_uci(&self) -> String {
        let mut parts = vec!["info".to_string()];

        if let Some(d) = self.depth {
            parts.push(format!("depth {}", d));
        }
        if let Some(s) = self.score {
            match s {
                Score::Cp(cp) => parts.push(format!("score cp {}", cp)),
                Score::Mate(m) => parts.push(format!("score mate {}", m)),
            }
        }
        if let Some(n) = self.nodes {
            parts.push(format!("nodes {}", n));
        }
        if !self.pv.is_empty() {
            parts.push(format!("pv {}", self.pv.join(" ")));
        }
        // Everything after "string" belongs to it, so it goes last.
        if let Some(ref s) = self.string {
            parts.push(format!("string {}", s));
        }

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_full_info() {
        let info = EngineInfo {
            depth: Some(4),
            score: Some(Score::Cp(35)),
            nodes: Some(12345),
            pv: vec!["e2e4".to_string()],
            string: None,
        };
        assert_eq!(info.to_uci(), "info depth 4 score cp 35 nodes 12345 pv e2e4");
    }

    #[test]
    fn format_mate_and_string() {
        let info = EngineInfo {
            score: Some(Score::Mate(-2)),
            string: Some("hello there".to_string()),
            ..EngineInfo::default()
        };
        assert_eq!(info.to_uci(), "info score mate -2 string hello there");
    }

    #[test]
    fn empty_info() {
        assert_eq!(EngineInfo::default().to_uci(), "info");
    }
}
