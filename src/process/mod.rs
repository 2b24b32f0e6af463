/*!
 * Process Module
 */

pub mod types;

pub use types::Process;
