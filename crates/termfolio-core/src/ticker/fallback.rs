//! Headlines shown when no source answers

use crate::models::{Headline, HeadlineOrigin};

const HEADLINES: [&str; 8] = [
    "Ronin Bridge drained of $624M after validator key compromise",
    "Poly Network exploit moves $611M across three chains",
    "Wormhole bridge loses $326M to signature verification bypass",
    "Euler Finance hit by $197M flash loan donation attack",
    "Nomad bridge drained of $190M in copycat free-for-all",
    "Beanstalk governance seized with a $182M flash loan",
    "Curve pools exploited through Vyper compiler reentrancy bug",
    "The DAO: 3.6M ETH siphoned through recursive calls",
];

/// The built-in list, in display order
pub fn headlines() -> Vec<Headline> {
    HEADLINES
        .iter()
        .map(|title| Headline::new(*title, HeadlineOrigin::Fallback))
        .collect()
}
