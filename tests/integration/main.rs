mod pipeline_tests;
mod project_tests;
