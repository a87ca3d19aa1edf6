//! Keyword pattern banks used by the heuristic classifier

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::classification::TaskType;

const GENERAL_REASON: &str = "no strong keyword signals; classified as general";

static STANDARD_BANK: Lazy<Arc<PatternBank>> = Lazy::new(|| Arc::new(PatternBank::build()));

/// Patterns voting for one task category
#[derive(Debug)]
pub struct TaskPatterns {
    pub task_type: TaskType,
    pub reason: &'static str,
    patterns: Vec<Regex>,
}

impl TaskPatterns {
    fn new(task_type: TaskType, reason: &'static str, patterns: &[&str]) -> Self {
        Self {
            task_type,
            reason,
            patterns: patterns.iter().map(|p| compile(p)).collect(),
        }
    }

    /// Number of patterns found anywhere in the text
    pub fn hits(&self, text: &str) -> usize {
        self.patterns.iter().filter(|p| p.is_match(text)).count()
    }
}

/// Signed score adjustment applied when its pattern is present
#[derive(Debug)]
pub struct Signal {
    pub delta: i64,
    pub reason: &'static str,
    pattern: Regex,
}

impl Signal {
    fn new(pattern: &str, delta: i64, reason: &'static str) -> Self {
        Self {
            delta,
            reason,
            pattern: compile(pattern),
        }
    }

    pub fn is_present(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Rationale fragment, e.g. "+2: involves architecture/design"
    pub fn describe(&self) -> String {
        if self.delta >= 0 {
            format!("+{}: {}", self.delta, self.reason)
        } else {
            format!("-{}: {}", -self.delta, self.reason)
        }
    }
}

/// Immutable bank of task patterns and score signals.
///
/// Task categories are kept in priority order; earlier categories win ties.
/// Signals hold boosters first, then reducers.
#[derive(Debug)]
pub struct PatternBank {
    tasks: Vec<TaskPatterns>,
    signals: Vec<Signal>,
}

impl PatternBank {
    /// Shared instance of the standard bank, compiled on first use
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD_BANK)
    }

    /// Category with the strictly highest hit count, with its explanation
    pub fn detect(&self, text: &str) -> (TaskType, &'static str) {
        let mut best = (TaskType::General, GENERAL_REASON);
        let mut best_hits = 0;

        for task in &self.tasks {
            let hits = task.hits(text);
            if hits > best_hits {
                best_hits = hits;
                best = (task.task_type, task.reason);
            }
        }

        best
    }

    pub fn tasks(&self) -> &[TaskPatterns] {
        &self.tasks
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    fn build() -> Self {
        const LANGUAGES: &str =
            "english|spanish|french|german|chinese|japanese|korean|hindi|arabic|portuguese|russian|italian";
        let translate_to = format!(
            r"(?i)\b(translat(e|ion)|convert)\b.*\b(to|into|from)\b.*\b({})\b",
            LANGUAGES
        );
        let in_language = format!(r"(?i)\b(in\s+({}))\b", LANGUAGES);

        let tasks = vec![
            TaskPatterns::new(
                TaskType::Code,
                "code-related keywords detected",
                &[
                    r"(?i)\b(def |class |import |function |const |let |var |=>|async |await )\b",
                    r"(?i)\b(python|javascript|typescript|java|rust|golang|c\+\+|sql|html|css|react|django|flask|fastapi)\b",
                    r"(?i)\b(write|build|create|implement|code|debug|fix|refactor|optimise|optimize)\b.*\b(function|class|api|app(lication)?|script|program|module|endpoint|server|database|query|service|system)\b",
                    r"(?i)\b(bug|error|exception|traceback|stack\s*trace|segfault|compile|runtime)\b",
                    r"```",
                ],
            ),
            TaskPatterns::new(
                TaskType::Math,
                "math/calculation keywords detected",
                &[
                    r"(?i)\b(solve|calculate|compute|derive|integrate|differentiate|prove|equation|formula)\b",
                    r"(?i)\b(algebra|calculus|geometry|trigonometry|probability|statistics|linear\s*algebra|matrix|matrices)\b",
                    r"[0-9]+\s*[\+\-\*/\^]\s*[0-9]+",
                    r"(?i)\b(sum|product|factorial|logarithm|sqrt|sin|cos|tan)\b",
                ],
            ),
            TaskPatterns::new(
                TaskType::Translation,
                "translation request detected",
                &[translate_to.as_str(), in_language.as_str()],
            ),
            TaskPatterns::new(
                TaskType::Creative,
                "creative writing keywords detected",
                &[
                    r"(?i)\b(write|compose|create|draft)\b.*\b(poem|story|essay|song|lyrics|haiku|limerick|narrative|fiction|blog\s*post|article)\b",
                    r"(?i)\b(creative|imaginative|poetic|artistic|metaphor|rhyme)\b",
                    r"(?i)\b(once upon a time|in a world where|dear diary)\b",
                ],
            ),
            TaskPatterns::new(
                TaskType::Reasoning,
                "complex reasoning keywords detected",
                &[
                    r"(?i)\b(reason|logic|deduc|induc|infer|hypothe|thought\s*experiment|paradox|dilemma)\b",
                    r"(?i)\b(step\s*by\s*step|chain\s*of\s*thought|think\s*through|work\s*through)\b",
                    r"(?i)\b(quantum|relativity|philosophy|epistemology|ontology|consciousness)\b",
                    r"(?i)\b(explain\s+(why|how)\b.*\b(complex|advanced|nuanced|detailed))\b",
                ],
            ),
            TaskPatterns::new(
                TaskType::Analysis,
                "analytical keywords detected",
                &[
                    r"(?i)\b(analy[sz]e|compare|contrast|evaluate|assess|critique|review|examine|investigate|discuss)\b",
                    r"(?i)\b(pros?\s+(and|&)\s+cons?|trade\s*-?\s*offs?|implications?|impact)\b",
                    r"(?i)\b(explain|describe|elaborate)\b.*\b(how|why|difference|relationship|impact)\b",
                ],
            ),
            TaskPatterns::new(
                TaskType::SimpleQa,
                "simple question pattern detected",
                &[
                    r"(?i)^(what|who|when|where|which|how\s+many|how\s+much|is|are|was|were|do|does|did|can|could)\b",
                    r"(?i)\b(define|meaning\s+of|what\s+is|who\s+is|capital\s+of)\b",
                ],
            ),
        ];

        let signals = vec![
            Signal::new(
                r"(?i)\b(step\s*by\s*step|detailed|comprehensive|thorough|in\s*-?\s*depth)\b",
                2,
                "requests detailed/thorough treatment",
            ),
            Signal::new(
                r"(?i)\b(compare|contrast|trade\s*-?\s*offs?|pros?\s+(and|&)\s+cons?)\b",
                1,
                "involves comparison/trade-off analysis",
            ),
            Signal::new(r"(?i)\b(explain|why|how\s+does|how\s+do)\b", 1, "asks for explanation"),
            Signal::new(
                r"(?i)\b(multiple|several|many|various|different)\b",
                1,
                "references multiple items",
            ),
            Signal::new(
                r"(?i)\b(advanced|complex|difficult|challenging|hard)\b",
                2,
                "explicitly mentions high difficulty",
            ),
            Signal::new(
                r"(?i)\b(error\s*handling|edge\s*case|security|authentication|authoriz)\b",
                1,
                "mentions robustness concerns",
            ),
            Signal::new(
                r"(?i)\b(architect|design\s*pattern|system\s*design|scalab|distributed)\b",
                2,
                "involves architecture/design",
            ),
            Signal::new(r"(?i)\b(simple|basic|easy|quick|brief|short)\b", -1, "explicitly simple/basic"),
            Signal::new(r"(?i)\b(yes\s+or\s+no|true\s+or\s+false)\b", -2, "binary question"),
            Signal::new(r"^.{1,30}$", -1, "very short prompt"),
        ];

        Self { tasks, signals }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}
