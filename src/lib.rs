// pptxsim: pairwise similarity for folders of PowerPoint submissions
//
// This is the library root. Each module is one stage of the pipeline:
// extract -> similarity -> scoring -> output, wired together by `pipeline`.

pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod similarity;
