/*!
# Query Catalog

The fixed set of analytical queries, each paired with the chart drawn from its
result. Queries join the tables produced by ingestion (`players_data`,
`goals_data`, `attacking_data`, ...) on `id_player`.
*/

use crate::errors::{ReportError, ReportResult};

/// How a query result is turned into a bar chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One bar per `x`, height `y`
    Bar { x: &'static str, y: &'static str },

    /// Bars coloured by the `hue` column, with a legend
    GroupedBar {
        x: &'static str,
        y: &'static str,
        hue: &'static str,
    },

    /// Wide to long: for each `id`, one bar per column in `values`
    Melted {
        id: &'static str,
        values: &'static [&'static str],
        value_label: &'static str,
    },

    /// `numerator / sum(denominator)` per row; null or zero denominators drop the row
    Ratio {
        x: &'static str,
        numerator: &'static str,
        denominator: &'static [&'static str],
        label: &'static str,
    },
}

impl ChartKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ChartKind::Bar { .. } => "bar",
            ChartKind::GroupedBar { .. } => "grouped bar",
            ChartKind::Melted { .. } => "melted bar",
            ChartKind::Ratio { .. } => "ratio bar",
        }
    }
}

/// A named query and the chart rendered from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub name: &'static str,
    pub title: &'static str,
    pub sql: &'static str,
    pub chart: ChartKind,
}

pub const CATALOG: &[ReportQuery] = &[
    ReportQuery {
        name: "top_goal_scorers_per_club",
        title: "Top Goal Scorers per Club",
        sql: "SELECT p.player_name, g.goals, p.team AS club
              FROM players_data p
              JOIN goals_data g ON p.id_player = g.id_player
              ORDER BY g.goals DESC
              LIMIT 10",
        chart: ChartKind::GroupedBar {
            x: "player_name",
            y: "goals",
            hue: "club",
        },
    },
    ReportQuery {
        name: "dribble_efficiency_per_player",
        title: "Top 10 Players by Dribbles Per Game",
        sql: "SELECT p.player_name,
                     ROUND(a.dribbles / NULLIF(k.matches_appareance, 0), 2) AS dribbles_per_game
              FROM players_data p
              JOIN attacking_data a ON p.id_player = a.id_player
              JOIN key_stats_data k ON p.id_player = k.id_player
              ORDER BY dribbles_per_game DESC
              LIMIT 10",
        chart: ChartKind::Bar {
            x: "player_name",
            y: "dribbles_per_game",
        },
    },
    ReportQuery {
        name: "passing_and_crossing_accuracy_by_position",
        title: "Passing and Crossing Accuracy by Position",
        sql: "SELECT p.field_position,
                     AVG(d.passing_accuracy_pct) AS avg_passing_accuracy,
                     AVG(d.crossing_accuracy_pct) AS avg_crossing_accuracy
              FROM players_data p
              JOIN distribution_data d ON p.id_player = d.id_player
              GROUP BY p.field_position",
        chart: ChartKind::Melted {
            id: "field_position",
            values: &["avg_passing_accuracy", "avg_crossing_accuracy"],
            value_label: "accuracy",
        },
    },
    ReportQuery {
        name: "defensive_duel_winners",
        title: "Top 10 Players by Tackles Won %",
        sql: "SELECT p.player_name,
                     ROUND(SUM(d.tackles_won) / NULLIF(SUM(d.tackles_won) + SUM(d.tackles_lost), 0), 2) AS tackles_won_pct
              FROM players_data p
              JOIN defending_data d ON p.id_player = d.id_player
              GROUP BY p.player_name
              ORDER BY tackles_won_pct DESC
              LIMIT 10",
        chart: ChartKind::Bar {
            x: "player_name",
            y: "tackles_won_pct",
        },
    },
    ReportQuery {
        name: "goalkeeping_performance",
        title: "Goalkeeper Performance: Saves per Goal",
        sql: "SELECT p.player_name, g.saves, g.goals_conceded
              FROM players_data p
              JOIN goalkeeping_data g ON p.id_player = g.id_player
              ORDER BY g.saves DESC
              LIMIT 10",
        chart: ChartKind::Ratio {
            x: "player_name",
            numerator: "saves",
            denominator: &["goals_conceded"],
            label: "saves_per_goal",
        },
    },
    ReportQuery {
        name: "discipline_vs_performance",
        title: "Goals per Card",
        sql: "SELECT p.player_name,
                     d.yellow_cards,
                     d.red_cards,
                     g.goals
              FROM players_data p
              JOIN disciplinary_data d ON p.id_player = d.id_player
              JOIN goals_data g ON p.id_player = g.id_player
              ORDER BY d.yellow_cards DESC, g.goals DESC
              LIMIT 10",
        chart: ChartKind::Ratio {
            x: "player_name",
            numerator: "goals",
            denominator: &["yellow_cards", "red_cards"],
            label: "goals_per_card",
        },
    },
    ReportQuery {
        name: "shot_on_target_efficiency",
        title: "Shot on Target Efficiency",
        sql: "SELECT p.player_name,
                     ROUND(attempts.on_target / NULLIF(attempts.total_attempts, 0) * 100, 2) AS shot_on_target_pct
              FROM players_data p
              JOIN attempts_data attempts ON p.id_player = attempts.id_player
              WHERE attempts.total_attempts > 0
              ORDER BY shot_on_target_pct DESC
              LIMIT 10",
        chart: ChartKind::Bar {
            x: "player_name",
            y: "shot_on_target_pct",
        },
    },
    ReportQuery {
        name: "most_accurate_passers",
        title: "Most Accurate Passers",
        sql: "SELECT p.player_name,
                     d.accurate_passes
              FROM players_data p
              JOIN distribution_data d ON p.id_player = d.id_player
              ORDER BY d.accurate_passes DESC
              LIMIT 10",
        chart: ChartKind::Bar {
            x: "player_name",
            y: "accurate_passes",
        },
    },
    ReportQuery {
        name: "average_age_by_club",
        title: "Clubs with Youngest Average Age",
        sql: "SELECT p.team AS club,
                     ROUND(AVG(k.age), 1) AS average_age
              FROM players_data p
              JOIN key_stats_data k ON p.id_player = k.id_player
              GROUP BY p.team
              ORDER BY average_age ASC
              LIMIT 10",
        chart: ChartKind::Bar {
            x: "club",
            y: "average_age",
        },
    },
    ReportQuery {
        name: "goal_contributions",
        title: "Top 10 Players by Goal Contributions",
        sql: "SELECT p.player_name,
                     g.goals,
                     a.assists,
                     (g.goals + a.assists) AS total_contributions
              FROM players_data p
              JOIN goals_data g ON p.id_player = g.id_player
              JOIN attacking_data a ON p.id_player = a.id_player
              ORDER BY total_contributions DESC
              LIMIT 10",
        chart: ChartKind::Bar {
            x: "player_name",
            y: "total_contributions",
        },
    },
];

pub fn find_query(name: &str) -> Option<&'static ReportQuery> {
    CATALOG.iter().find(|q| q.name == name)
}

/// Resolve query names against the catalog; no names selects everything.
///
/// Unknown names fail before anything runs.
pub fn select_queries(names: &[String]) -> ReportResult<Vec<&'static ReportQuery>> {
    if names.is_empty() {
        return Ok(CATALOG.iter().collect());
    }

    names
        .iter()
        .map(|name| find_query(name).ok_or_else(|| ReportError::UnknownQuery(name.clone())))
        .collect()
}
