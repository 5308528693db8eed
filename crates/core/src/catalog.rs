//! Built-in weekly editions.
//!
//! Each edition is plain data; adding a week means adding one more table here,
//! not another copy of the quiz logic.

use crate::Error;
use crate::model::{Question, QuestionError, Quiz, QuizError, QuizId};

struct Entry {
    id: &'static str,
    prompt: &'static str,
    options: [&'static str; 4],
    correct: usize,
    explanation: &'static str,
    source: Option<&'static str>,
}

struct Edition {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    entries: &'static [Entry],
}

const WEEK_OF_2025_11_24: Edition = Edition {
    id: "2025-11-24",
    title: "Week of 24 November 2025",
    description: "Test your knowledge with 5 questions from this week's Crypto Nutshell newsletters.",
    entries: &[
        Entry {
            id: "q1",
            prompt: "What is the primary mechanism that Bitcoin uses to adjust mining difficulty approximately every two weeks?",
            options: [
                "Difficulty Adjustment Algorithm (DAA)",
                "Proof of Stake consensus",
                "Hash rate targeting",
                "Block time averaging",
            ],
            correct: 0,
            explanation: "Bitcoin uses the Difficulty Adjustment Algorithm (DAA) to automatically adjust mining difficulty every 2016 blocks (approximately every two weeks) based on the time it took to mine the previous 2016 blocks.",
            source: Some("Monday Daily"),
        },
        Entry {
            id: "q2",
            prompt: "Which Ethereum improvement proposal (EIP) introduced the concept of account abstraction, allowing smart contracts to act as wallets?",
            options: ["EIP-1559", "EIP-4337", "EIP-4844", "EIP-3074"],
            correct: 1,
            explanation: "EIP-4337 introduced account abstraction without requiring changes to the Ethereum protocol consensus layer, enabling smart contracts to function as wallets with custom validation logic.",
            source: Some("Pro #35"),
        },
        Entry {
            id: "q3",
            prompt: "As of November 2025, approximately how many spot Bitcoin ETFs are trading in the United States?",
            options: ["5-7 ETFs", "8-10 ETFs", "11-13 ETFs", "14+ ETFs"],
            correct: 2,
            explanation: "Following the SEC approval in January 2024, multiple asset managers launched spot Bitcoin ETFs, with the number growing to approximately 11-13 actively trading ETFs by late 2025.",
            source: Some("Wednesday Daily"),
        },
        Entry {
            id: "q4",
            prompt: "What on-chain metric is calculated by dividing the total market cap by the realized cap, and is often used to assess whether Bitcoin is overvalued or undervalued?",
            options: ["MVRV Ratio", "NVT Ratio", "Puell Multiple", "Reserve Risk"],
            correct: 0,
            explanation: "The MVRV (Market Value to Realized Value) ratio compares Bitcoin's current market cap to its realized cap (sum of all coins at their last moved price), helping identify when Bitcoin is trading above or below its \"fair value\".",
            source: Some("Friday Daily"),
        },
        Entry {
            id: "q5",
            prompt: "In macro analysis, what term describes the phenomenon where central banks continue to hold large balance sheets even after quantitative easing programs end?",
            options: [
                "Balance sheet normalization",
                "Quantitative tightening",
                "Balance sheet permanence",
                "Monetary policy divergence",
            ],
            correct: 2,
            explanation: "Balance sheet permanence refers to the observation that central banks tend to maintain elevated balance sheet levels post-QE, effectively making the expanded balance sheets a permanent feature of monetary policy rather than a temporary measure.",
            source: Some("Pro #36"),
        },
    ],
};

const ISSUES_749_TO_753: Edition = Edition {
    id: "nutshell-749-753",
    title: "Last Week on Crypto Nutshell",
    description: "Think you paid attention this week? Let’s find out.",
    entries: &[
        Entry {
            id: "753",
            prompt: "In Crypto Nutshell #753, JPMorgan estimated a new Bitcoin production cost that institutions are watching closely as a potential floor. Roughly what level did they peg this cost at after the latest difficulty increase?",
            options: ["$75,000", "$94,000", "$120,000", "$150,000"],
            correct: 1,
            explanation: "JPMorgan put Bitcoin’s production cost at roughly $94,000 after rising network difficulty. That figure has become a key reference for institutions looking at potential downside support.",
            source: Some("#753 – Is it over?"),
        },
        Entry {
            id: "752",
            prompt: "In Crypto Nutshell #752, Tom Lee argued that $63,000 Ethereum is not crazy if a certain amount of global assets are tokenized on Ethereum. Roughly how much value did he say would need to be tokenized for ETH to reach that level?",
            options: ["$700 billion", "$3 trillion", "$7 trillion", "$30 trillion"],
            correct: 2,
            explanation: "Tom Lee’s back-of-the-envelope math suggested that if around $7 trillion of global assets migrate onto Ethereum, it could justify an ETH price in the $63,000 range.",
            source: Some("#752 – $63,000 Ethereum isn’t crazy"),
        },
        Entry {
            id: "751",
            prompt: "In Crypto Nutshell #751, Sygnum’s institutional survey showed a shift in why institutions hold crypto. What was cited as the primary reason most institutions now allocate to digital assets?",
            options: [
                "Short term speculative gains",
                "Regulatory arbitrage opportunities",
                "Portfolio diversification",
                "Access to DeFi yields",
            ],
            correct: 2,
            explanation: "According to Sygnum’s report, diversification overtook speculation as the top reason institutions allocate to crypto. It is now viewed as a strategic portfolio component rather than a pure punt.",
            source: Some("#751 – Diversification, not hype"),
        },
        Entry {
            id: "750",
            prompt: "In Crypto Nutshell #750, the Senate Agriculture Committee’s draft bill was described as a key step toward US crypto market structure. Which agency would receive expanded authority over spot digital commodities like Bitcoin under this proposal?",
            options: [
                "The Securities and Exchange Commission (SEC)",
                "The Commodity Futures Trading Commission (CFTC)",
                "The Federal Reserve",
                "The Office of the Comptroller of the Currency (OCC)",
            ],
            correct: 1,
            explanation: "The draft bill gives the CFTC primary authority over spot digital commodities such as Bitcoin, while directing it to coordinate with the SEC on joint rulemaking. It is a major move toward clearer market structure.",
            source: Some("#750 – Regulatory clarity"),
        },
        Entry {
            id: "749",
            prompt: "In Crypto Nutshell #749, the Long and Short Term Holder Threshold breakdown showed how much Bitcoin is in strong hands. Roughly what percentage of total BTC supply was held by long term holders (coins older than 155 days)?",
            options: ["45% of supply", "60% of supply", "72% of supply", "85% of supply"],
            correct: 2,
            explanation: "The newsletter highlighted that about 14.38 million BTC, or roughly 72 percent of supply, sits with long term holders. Even after heavy distribution, the base of committed holders remains very high.",
            source: Some("#749 – Long term holders unloading"),
        },
    ],
};

/// Newest edition last.
const EDITIONS: [&Edition; 2] = [&WEEK_OF_2025_11_24, &ISSUES_749_TO_753];

impl Edition {
    fn build(&self) -> Result<Quiz, QuizError> {
        let questions = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Question::new(
                    entry.id,
                    entry.prompt,
                    entry.options,
                    entry.correct,
                    entry.explanation,
                    entry.source,
                )
                .map_err(|source| QuizError::Question { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Quiz::new(QuizId::new(self.id), self.title, self.description, questions)
    }
}

/// Ids of every built-in edition, oldest first.
#[must_use]
pub fn edition_ids() -> Vec<QuizId> {
    EDITIONS.iter().map(|e| QuizId::new(e.id)).collect()
}

/// Every built-in edition, oldest first.
///
/// # Errors
///
/// Returns `Error::Quiz` if an edition table violates the quiz invariants.
pub fn editions() -> Result<Vec<Quiz>, Error> {
    Ok(EDITIONS.iter().map(|e| e.build()).collect::<Result<_, _>>()?)
}

/// Look up a built-in edition by id. `Ok(None)` if no edition has that id.
///
/// # Errors
///
/// Returns `Error::Quiz` if the edition table violates the quiz invariants.
pub fn edition(id: &QuizId) -> Result<Option<Quiz>, Error> {
    Ok(EDITIONS
        .iter()
        .find(|e| e.id == id.as_str())
        .map(|e| e.build())
        .transpose()?)
}

/// The newest built-in edition.
///
/// # Errors
///
/// Returns `Error::Quiz` if the edition table violates the quiz invariants.
pub fn current() -> Result<Quiz, Error> {
    Ok(EDITIONS[EDITIONS.len() - 1].build()?)
}

/// Synthetic quiz with one question per entry of `correct`, for tests and doc
/// examples. Question `i` has id `q{i}` and options `A`–`D`.
///
/// # Panics
///
/// Panics if `correct` is empty or holds an index outside `0..4`.
#[must_use]
pub fn fixture_quiz(correct: &[usize]) -> Quiz {
    let questions = correct
        .iter()
        .enumerate()
        .map(|(i, &answer)| {
            Question::new(
                format!("q{i}"),
                format!("Question {}?", i + 1),
                ["A", "B", "C", "D"],
                answer,
                format!("The answer is option {answer}."),
                Some("Fixture"),
            )
        })
        .collect::<Result<Vec<_>, QuestionError>>()
        .expect("fixture answers must be option indices");

    Quiz::new(QuizId::new("fixture"), "Fixture quiz", "", questions)
        .expect("fixture quiz must have at least one question")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
