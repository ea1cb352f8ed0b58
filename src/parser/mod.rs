pub mod lines;
pub mod rubric;

pub use lines::flatten;
pub use rubric::{
    classify, extract_criteria, extract_points, extract_rubrics, is_header, is_optional,
    is_rubric_tag, strip_header, ClassifiedLine, ParsedRubric,
};
