// CV template: fixed Cegeka layout filled with one employee profile.
// All literal content lives in placeholders.rs; builder.rs only assembles.

pub mod builder;
pub mod placeholders;

pub use builder::CvBuilder;
