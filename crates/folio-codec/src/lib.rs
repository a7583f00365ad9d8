/// Folio storage codecs
///
/// Secrets kept in client storage are passed through an [`Obfuscator`] so they
/// are not readable with a casual grep. This is an encoding, not encryption:
/// there is no key, and anyone holding the stored value can reverse it.
pub mod obfuscate;

pub use obfuscate::{Base64Obfuscator, Obfuscator};
