//! Static catalog of debugging challenges.

use std::str::FromStr;

use crate::common::{Challenge, Difficulty, Priority, RecommendedTask};
use crate::tutor::api_types::RecommendationResponse;

/// Difficulty filter offered on the challenges page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub const CHOICES: [DifficultyFilter; 4] = [
        DifficultyFilter::All,
        DifficultyFilter::Only(Difficulty::Easy),
        DifficultyFilter::Only(Difficulty::Medium),
        DifficultyFilter::Only(Difficulty::Hard),
    ];

    pub fn matches(&self, challenge: &Challenge) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(difficulty) => challenge.difficulty == *difficulty,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyFilter::All => "all",
            DifficultyFilter::Only(difficulty) => difficulty.as_str(),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(DifficultyFilter::All);
        }
        s.parse().map(DifficultyFilter::Only)
    }
}

fn challenge(
    id: &str,
    title: &str,
    description: &str,
    difficulty: Difficulty,
    category: &str,
    buggy_code: &str,
    solution: &str,
    hints: &[&str],
) -> Challenge {
    Challenge {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        difficulty,
        category: category.to_string(),
        buggy_code: buggy_code.to_string(),
        solution: Some(solution.to_string()),
        hints: hints.iter().map(|hint| hint.to_string()).collect(),
        completed: false,
    }
}

/// All six challenges, in display order.
pub fn catalog() -> Vec<Challenge> {
    vec![
        challenge(
            "1",
            "Off-by-One Loop Error",
            "Fix the loop that should print numbers 1 to 10",
            Difficulty::Easy,
            "Loops",
            "for i in range(10):\n    print(i)",
            "for i in range(1, 11):\n    print(i)",
            &[
                "range(10) generates 0-9, not 1-10",
                "Try range(1, 11) for numbers 1 through 10",
            ],
        ),
        challenge(
            "2",
            "List Index Error",
            "Fix the function that crashes when accessing list elements",
            Difficulty::Medium,
            "Lists",
            "def get_last_three(items):\n    return [items[-1], items[-2], items[-3]]\n\nmy_list = [1, 2]\nprint(get_last_three(my_list))",
            "def get_last_three(items):\n    if len(items) < 3:\n        return items\n    return [items[-1], items[-2], items[-3]]\n\nmy_list = [1, 2]\nprint(get_last_three(my_list))",
            &[
                "Check the length of the list first",
                "What happens if the list has fewer than 3 items?",
            ],
        ),
        challenge(
            "3",
            "Function Return Bug",
            "Fix the function that returns None instead of the result",
            Difficulty::Easy,
            "Functions",
            "def multiply(a, b):\n    result = a * b\n\nprint(multiply(5, 3))",
            "def multiply(a, b):\n    result = a * b\n    return result\n\nprint(multiply(5, 3))",
            &[
                "Functions need to explicitly return values",
                "Add a return statement with the result",
            ],
        ),
        challenge(
            "4",
            "Indentation Error",
            "Fix the syntax error in this conditional statement",
            Difficulty::Easy,
            "Syntax",
            "x = 10\nif x > 5:\nprint(\"Greater than 5\")\nelse:\n    print(\"Not greater\")",
            "x = 10\nif x > 5:\n    print(\"Greater than 5\")\nelse:\n    print(\"Not greater\")",
            &[
                "Python uses indentation to define code blocks",
                "Check the indentation after the if statement",
            ],
        ),
        challenge(
            "5",
            "Infinite Loop Debug",
            "Find and fix the infinite loop",
            Difficulty::Hard,
            "Loops",
            "count = 0\nwhile count < 10:\n    print(count)\n    if count == 5:\n        continue\n    count += 1",
            "count = 0\nwhile count < 10:\n    print(count)\n    count += 1\n    if count == 5:\n        print(\"Reached 5!\")",
            &[
                "The continue statement skips the increment when count is 5",
                "Move the increment before the if statement",
                "Or remove the continue and use a different approach",
            ],
        ),
        challenge(
            "6",
            "Dictionary Key Error",
            "Handle missing dictionary keys safely",
            Difficulty::Medium,
            "Dictionaries",
            "student = {'name': 'Alice', 'age': 20}\nprint(student['grade'])",
            "student = {'name': 'Alice', 'age': 20}\nprint(student.get('grade', 'N/A'))\n# Or use:\n# if 'grade' in student:\n#     print(student['grade'])",
            &[
                "Use .get() method with a default value",
                "Or check if the key exists before accessing",
            ],
        ),
    ]
}

pub fn filtered(filter: DifficultyFilter) -> Vec<Challenge> {
    catalog()
        .into_iter()
        .filter(|challenge| filter.matches(challenge))
        .collect()
}

pub fn find(id: &str) -> Option<Challenge> {
    catalog().into_iter().find(|challenge| challenge.id == id)
}

/// Banner shown before any recommendation has been fetched.
pub fn default_recommendation() -> Option<RecommendedTask> {
    let challenge = find("1")?;
    Some(RecommendedTask {
        id: challenge.id.clone(),
        title: "Try fixing a loop off-by-one error".to_string(),
        reason: "Based on your recent progress, this challenge will help you master loop boundaries"
            .to_string(),
        priority: Priority::High,
        challenge,
    })
}

/// Turn a backend recommendation into a banner, if it names a known
/// challenge.
pub fn recommendation_from(response: &RecommendationResponse) -> Option<RecommendedTask> {
    let challenge = find(&response.challenge_id)?;
    let priority = if response.confidence >= 0.8 {
        Priority::High
    } else if response.confidence >= 0.5 {
        Priority::Medium
    } else {
        Priority::Low
    };
    Some(RecommendedTask {
        id: challenge.id.clone(),
        title: response.title.clone(),
        reason: response.reason.clone(),
        priority,
        challenge,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_has_six_unique_challenges() {
        let challenges = catalog();

        assert_eq!(challenges.len(), 6);
        let ids: HashSet<_> = challenges.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
        assert!(challenges.iter().all(|c| !c.hints.is_empty() && c.solution.is_some()));
        assert!(challenges.iter().all(|c| !c.completed));
    }

    #[test]
    fn filter_by_difficulty() {
        assert_eq!(filtered(DifficultyFilter::All).len(), 6);
        assert_eq!(filtered(DifficultyFilter::Only(Difficulty::Easy)).len(), 3);
        assert_eq!(filtered(DifficultyFilter::Only(Difficulty::Medium)).len(), 2);

        let hard = filtered(DifficultyFilter::Only(Difficulty::Hard));
        assert_eq!(hard.len(), 1);
        assert_eq!(hard[0].title, "Infinite Loop Debug");
    }

    #[test]
    fn filter_parses_from_labels() {
        for choice in DifficultyFilter::CHOICES {
            assert_eq!(choice.label().parse::<DifficultyFilter>(), Ok(choice));
        }
        assert!("impossible".parse::<DifficultyFilter>().is_err());
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find("4").unwrap().category, "Syntax");
        assert!(find("7").is_none());
    }

    #[test]
    fn recommendation_priority_follows_confidence() {
        let mut response = RecommendationResponse::fallback();
        assert_eq!(recommendation_from(&response).unwrap().priority, Priority::High);

        response.confidence = 0.6;
        assert_eq!(recommendation_from(&response).unwrap().priority, Priority::Medium);

        response.confidence = 0.1;
        assert_eq!(recommendation_from(&response).unwrap().priority, Priority::Low);

        response.challenge_id = "99".to_string();
        assert!(recommendation_from(&response).is_none());
    }

    #[test]
    fn default_recommendation_points_at_loop_challenge() {
        let task = default_recommendation().unwrap();

        assert_eq!(task.challenge.title, "Off-by-One Loop Error");
        assert_eq!(task.priority, Priority::High);
    }
}
