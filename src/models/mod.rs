//! Models are the data the notes core moves around: the note record itself
//! plus the pieces used to create and classify notes.

pub mod note;
pub mod validate;
