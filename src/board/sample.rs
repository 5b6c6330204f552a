//! Sample roster generation.
//!
//! Builds a fully-placed synthetic roster sized to the current settings:
//! `class_count × capacity` students with de-duplicated Korean names,
//! gender biased 60/40 toward male, a light tag load drawn from the
//! built-in tags, and block placement filling class "1" to capacity,
//! then class "2", and so on.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::ident;
use crate::models::{Gender, SchoolLevel, Student, TagDefinition};

const LAST_NAMES: &[&str] = &[
    "김", "이", "박", "최", "정", "강", "조", "윤", "장", "임", "한", "오", "서",
    "신", "권", "황", "안", "송", "전", "홍", "문", "손", "배", "백", "허",
];

const FIRST_NAMES: &[&str] = &[
    "민준", "서준", "도윤", "예준", "시우", "하준", "지호", "주원", "지후", "준우",
    "서윤", "서연", "지우", "지유", "하윤", "서현", "민서", "하은", "지아", "수아",
    "은지", "지원", "현우", "민재", "채원", "다은", "가은", "준영", "현준", "예은",
    "유진", "시현", "건우", "우진", "민규", "예원", "윤우", "서아", "연우", "하율",
    "다인", "연주", "승우", "지민", "유나", "가윤", "시은", "준호", "동현",
];

const NAME_ATTEMPTS: usize = 50;

/// Generates a placed sample roster for the given settings.
///
/// Produces exactly `class_count × capacity_per_class` students. Student
/// *i* (0-based) lands in class `i / capacity + 1`. Tag load per
/// student: 15% chance of exactly one tag, 15% of exactly two, else
/// none, drawn from `tags` without repetition.
pub fn generate_students<R: Rng>(
    school_level: SchoolLevel,
    class_count: u32,
    tags: &[TagDefinition],
    rng: &mut R,
) -> Vec<Student> {
    let capacity = school_level.capacity_per_class();
    let total = (class_count * capacity) as usize;

    let mut students = Vec::with_capacity(total);
    let mut used_names: HashSet<String> = HashSet::new();

    for i in 0..total {
        let name = unique_name(&mut used_names, i, rng);

        let gender = if rng.random_bool(0.6) {
            Gender::Male
        } else {
            Gender::Female
        };

        let tag_count = match rng.random::<f64>() {
            r if r < 0.15 => 1,
            r if r < 0.30 => 2,
            _ => 0,
        };
        let tag_ids: Vec<String> = tags
            .choose_multiple(rng, tag_count)
            .map(|t| t.id.clone())
            .collect();

        let class_id = (i as u32 / capacity + 1).to_string();

        students.push(
            Student::new(ident::new_id("sample"), name)
                .with_gender(gender)
                .with_tags(tag_ids)
                .with_class(class_id),
        );
    }

    students
}

/// Draws a name not used so far; falls back to `학생{i+1}` when the
/// random pool keeps colliding.
fn unique_name<R: Rng>(used: &mut HashSet<String>, i: usize, rng: &mut R) -> String {
    for _ in 0..NAME_ATTEMPTS {
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("김");
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("민준");
        let candidate = format!("{last}{first}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
    }
    let fallback = format!("학생{}", i + 1);
    used.insert(fallback.clone());
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::builtin_tags;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_roster_size_and_placement() {
        let mut rng = StdRng::seed_from_u64(1);
        let tags = builtin_tags();
        let students = generate_students(SchoolLevel::ElementaryMiddle, 3, &tags, &mut rng);

        assert_eq!(students.len(), 18);
        for class_id in ["1", "2", "3"] {
            let count = students.iter().filter(|s| s.is_in_class(class_id)).count();
            assert_eq!(count, 6, "class {class_id} should be at capacity");
        }
    }

    #[test]
    fn test_high_school_capacity() {
        let mut rng = StdRng::seed_from_u64(2);
        let tags = builtin_tags();
        let students = generate_students(SchoolLevel::High, 2, &tags, &mut rng);

        assert_eq!(students.len(), 14);
        assert_eq!(students.iter().filter(|s| s.is_in_class("1")).count(), 7);
    }

    #[test]
    fn test_names_unique() {
        let mut rng = StdRng::seed_from_u64(3);
        let tags = builtin_tags();
        let students = generate_students(SchoolLevel::ElementaryMiddle, 3, &tags, &mut rng);

        let names: HashSet<&str> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), students.len());
    }

    #[test]
    fn test_tag_load_bounded_and_builtin() {
        let mut rng = StdRng::seed_from_u64(4);
        let tags = builtin_tags();
        let students = generate_students(SchoolLevel::ElementaryMiddle, 5, &tags, &mut rng);

        for s in &students {
            assert!(s.tag_ids.len() <= 2);
            for tid in &s.tag_ids {
                assert!(tags.iter().any(|t| &t.id == tid));
            }
            // No duplicate tags on one student.
            let distinct: HashSet<&str> = s.tag_ids.iter().map(String::as_str).collect();
            assert_eq!(distinct.len(), s.tag_ids.len());
        }
    }

    #[test]
    fn test_every_student_has_gender() {
        let mut rng = StdRng::seed_from_u64(5);
        let tags = builtin_tags();
        let students = generate_students(SchoolLevel::ElementaryMiddle, 3, &tags, &mut rng);
        assert!(students.iter().all(|s| s.gender.is_some()));
    }
}
