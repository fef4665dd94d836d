// SelectionsSaver host collaborators
// Narrow interfaces to the editor and the prompt/notification surface, plus
// scripted implementations for tests and the RPC front end.

pub mod editor;
pub mod prompt;
pub mod scripted_editor;
pub mod scripted_prompt;
