//! Scoring helpers shared by the selection policies

/// Calculates the exploitation term for UCT
///
/// This is simply the win rate of a node.
pub fn exploitation_term(wins: u64, visits: u64) -> f64 {
    win_rate(wins, visits)
}

/// Calculates the exploration term for UCT
///
/// This is the term that encourages exploration of less-visited nodes.
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }

    exploration_constant * ((parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// Calculates the UCT value of a child
///
/// ```text
/// UCT = wins / visits + C * sqrt(ln(parent_visits) / visits)
/// ```
///
/// Unvisited children score infinity; the search never relies on that since
/// unvisited children are picked before any scoring happens.
pub fn uct_value(wins: u64, visits: u64, parent_visits: u64, exploration_constant: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    exploitation_term(wins, visits)
        + exploration_term(parent_visits, visits, exploration_constant)
}

/// Weight given to the RAVE estimate for a parent with `parent_visits` visits
///
/// ```text
/// beta = sqrt(k / (3 * parent_visits + k))
/// ```
///
/// `k` is the equivalence parameter; beta starts at 1 and decays towards 0
/// as the parent accumulates visits.
pub fn rave_beta(equivalence: f64, parent_visits: u64) -> f64 {
    (equivalence / (3.0 * parent_visits as f64 + equivalence)).sqrt()
}

/// Safely calculates the win rate from wins and visits
///
/// Returns 0.0 if no visits have occurred.
pub fn win_rate(wins: u64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    wins as f64 / visits as f64
}
