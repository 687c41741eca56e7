//! Class metadata model and the reader adapter fed by classfile parser events

mod flag;
mod info;
mod reader;

pub use flag::{access_flags, AccessFlags};
pub use info::{method_key, ClassInfo, ConstantValue, FieldInfo, Info, MethodInfo};
pub use reader::{ClassInfoVisitor, ClassVisitor};
