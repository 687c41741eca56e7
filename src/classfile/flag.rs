//! Access flags for classes, fields, and methods

/// Access flag bit values, as they appear in the class file access word.
///
/// Several values are shared between entity kinds (`ACC_SUPER`/`ACC_SYNCHRONIZED`,
/// `ACC_VOLATILE`/`ACC_BRIDGE`, `ACC_TRANSIENT`/`ACC_VARARGS`); which reading
/// applies depends on whether the word belongs to a class, a field or a method.
pub mod access_flags {
    pub const ACC_PUBLIC: u32 = 0x0001;
    pub const ACC_PRIVATE: u32 = 0x0002;
    pub const ACC_PROTECTED: u32 = 0x0004;
    pub const ACC_STATIC: u32 = 0x0008;
    pub const ACC_FINAL: u32 = 0x0010;
    pub const ACC_SUPER: u32 = 0x0020;
    pub const ACC_SYNCHRONIZED: u32 = 0x0020;
    pub const ACC_VOLATILE: u32 = 0x0040;
    pub const ACC_BRIDGE: u32 = 0x0040;
    pub const ACC_TRANSIENT: u32 = 0x0080;
    pub const ACC_VARARGS: u32 = 0x0080;
    pub const ACC_NATIVE: u32 = 0x0100;
    pub const ACC_INTERFACE: u32 = 0x0200;
    pub const ACC_ABSTRACT: u32 = 0x0400;
    pub const ACC_STRICT: u32 = 0x0800;
    pub const ACC_SYNTHETIC: u32 = 0x1000;
    pub const ACC_ANNOTATION: u32 = 0x2000;
    pub const ACC_ENUM: u32 = 0x4000;
    pub const ACC_MODULE: u32 = 0x8000;
    /// Pseudo-flag above the classfile u16 range; the class reader folds the
    /// Deprecated attribute into the access word under this bit.
    pub const ACC_DEPRECATED: u32 = 0x20000;
}

use access_flags::*;

/// Pure predicates over an access bitmask, shared by class, method and field
/// records.
pub trait AccessFlags {
    /// The raw access word.
    fn access(&self) -> u32;

    fn is_public(&self) -> bool {
        self.access() & ACC_PUBLIC != 0
    }

    fn is_private(&self) -> bool {
        self.access() & ACC_PRIVATE != 0
    }

    fn is_protected(&self) -> bool {
        self.access() & ACC_PROTECTED != 0
    }

    /// None of public, private or protected are set.
    fn is_package_private(&self) -> bool {
        self.access() & (ACC_PUBLIC | ACC_PRIVATE | ACC_PROTECTED) == 0
    }

    fn is_static(&self) -> bool {
        self.access() & ACC_STATIC != 0
    }

    fn is_final(&self) -> bool {
        self.access() & ACC_FINAL != 0
    }

    fn is_super(&self) -> bool {
        self.access() & ACC_SUPER != 0
    }

    fn is_synchronized(&self) -> bool {
        self.access() & ACC_SYNCHRONIZED != 0
    }

    fn is_volatile(&self) -> bool {
        self.access() & ACC_VOLATILE != 0
    }

    fn is_bridge(&self) -> bool {
        self.access() & ACC_BRIDGE != 0
    }

    fn is_transient(&self) -> bool {
        self.access() & ACC_TRANSIENT != 0
    }

    fn is_varargs(&self) -> bool {
        self.access() & ACC_VARARGS != 0
    }

    fn is_native(&self) -> bool {
        self.access() & ACC_NATIVE != 0
    }

    fn is_interface(&self) -> bool {
        self.access() & ACC_INTERFACE != 0
    }

    fn is_abstract(&self) -> bool {
        self.access() & ACC_ABSTRACT != 0
    }

    fn is_strict(&self) -> bool {
        self.access() & ACC_STRICT != 0
    }

    fn is_synthetic(&self) -> bool {
        self.access() & ACC_SYNTHETIC != 0
    }

    fn is_annotation(&self) -> bool {
        self.access() & ACC_ANNOTATION != 0
    }

    fn is_enum(&self) -> bool {
        self.access() & ACC_ENUM != 0
    }

    fn is_deprecated(&self) -> bool {
        self.access() & ACC_DEPRECATED != 0
    }
}
