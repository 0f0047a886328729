//! Arena-backed symbol graph

use crate::error::GraphError;
use crate::protection::Protection;
use la_arena::{Arena, Idx};
use rustc_hash::FxHashMap;
use sr_intern::Symbol;
use sr_span::{FileId, Loc};

/// Unique identifier for a package
pub type PackageId = Idx<Package>;
/// Unique identifier for a module
pub type ModuleId = Idx<Module>;
/// Unique identifier for an aggregate
pub type AggregateId = Idx<Aggregate>;
/// Unique identifier for a member declaration
pub type MemberId = Idx<Member>;
/// Unique identifier for a function
pub type FunctionId = Idx<Function>;

/// Enclosing scope of a symbol
///
/// The upward link every symbol carries; parent chains terminate at a
/// module (possibly inside packages) or at an unparented root.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeParent {
    Package(PackageId),
    Module(ModuleId),
    Aggregate(AggregateId),
    Function(FunctionId),
}

/// A node in the package tree
#[derive(Debug)]
pub struct Package {
    pub name: Symbol,
    /// Parent package, absent for a root package
    pub parent: Option<PackageId>,
    /// Set when the package is itself importable as a module
    pub package_module: Option<ModuleId>,
    children: FxHashMap<Symbol, ScopeParent>,
}

/// A compilation module
#[derive(Debug)]
pub struct Module {
    pub name: Symbol,
    /// Canonical source file; module identity keys off this
    pub file: FileId,
    /// Nearest enclosing package, absent for an unparented module
    pub parent: Option<PackageId>,
    /// Back-link when this module doubles as a package node
    pub as_package: Option<PackageId>,
    decls: FxHashMap<Symbol, MemberId>,
}

/// Whether an aggregate is a struct or a class
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AggregateKind {
    Struct,
    Class,
}

/// Inheritance edge from a derived class to a base class
///
/// Carries its own protection attribute, which can tighten the visibility
/// of everything inherited through it.
#[derive(Copy, Clone, Debug)]
pub struct BaseEdge {
    pub base: AggregateId,
    pub protection: Protection,
}

/// A class or struct declaration
#[derive(Debug)]
pub struct Aggregate {
    pub name: Symbol,
    pub kind: AggregateKind,
    pub parent: ScopeParent,
    /// Base-class edges in declaration order; always empty for structs
    pub bases: Vec<BaseEdge>,
    pub is_deprecated: bool,
    members: FxHashMap<Symbol, MemberId>,
}

/// Kind of a member or free-standing declaration
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method,
    Function,
    Variable,
    UnitTest,
}

impl MemberKind {
    /// Human-readable kind used in diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Method | Self::Function => "function",
            Self::Variable => "variable",
            Self::UnitTest => "unittest",
        }
    }
}

/// A declaration subject to access checking
///
/// Aggregate members and module-level declarations share this
/// representation; the parent link tells them apart.
#[derive(Debug)]
pub struct Member {
    pub name: Symbol,
    pub parent: ScopeParent,
    pub protection: Protection,
    pub kind: MemberKind,
    pub is_static: bool,
    pub is_deprecated: bool,
    /// Declaration site, used by diagnostics
    pub loc: Loc,
}

impl Member {
    /// The owning aggregate, if this is an aggregate member
    pub fn owner(&self) -> Option<AggregateId> {
        match self.parent {
            ScopeParent::Aggregate(id) => Some(id),
            _ => None,
        }
    }
}

/// A function, tracked for caller-side scope chains
///
/// Access checks need to know which aggregate (if any) the running function
/// belongs to, across arbitrarily nested local functions.
#[derive(Debug)]
pub struct Function {
    pub name: Symbol,
    pub parent: ScopeParent,
    pub is_deprecated: bool,
}

/// The full symbol graph for a compilation
///
/// Built once during declaration processing; read-only afterwards.
#[derive(Debug, Default)]
pub struct SymbolGraph {
    packages: Arena<Package>,
    modules: Arena<Module>,
    aggregates: Arena<Aggregate>,
    members: Arena<Member>,
    functions: Arena<Function>,
}

impl SymbolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a package under an optional parent
    pub fn add_package(
        &mut self,
        name: Symbol,
        parent: Option<PackageId>,
    ) -> Result<PackageId, GraphError> {
        let id = self.packages.alloc(Package {
            name,
            parent,
            package_module: None,
            children: FxHashMap::default(),
        });
        if let Some(parent) = parent {
            self.register_child(parent, name, ScopeParent::Package(id))?;
        }
        Ok(id)
    }

    /// Create a module under an optional parent package
    pub fn add_module(
        &mut self,
        name: Symbol,
        file: FileId,
        parent: Option<PackageId>,
    ) -> Result<ModuleId, GraphError> {
        let id = self.modules.alloc(Module {
            name,
            file,
            parent,
            as_package: None,
            decls: FxHashMap::default(),
        });
        if let Some(parent) = parent {
            self.register_child(parent, name, ScopeParent::Module(id))?;
        }
        Ok(id)
    }

    /// Create the module that represents a package itself
    ///
    /// The module takes the package's name and parent and the two nodes
    /// link to each other; importing the package means importing this
    /// module.
    pub fn add_package_module(
        &mut self,
        package: PackageId,
        file: FileId,
    ) -> Result<ModuleId, GraphError> {
        let (name, parent) = {
            let pkg = &self.packages[package];
            (pkg.name, pkg.parent)
        };
        let id = self.modules.alloc(Module {
            name,
            file,
            parent,
            as_package: Some(package),
            decls: FxHashMap::default(),
        });
        self.packages[package].package_module = Some(id);
        Ok(id)
    }

    fn register_child(
        &mut self,
        parent: PackageId,
        name: Symbol,
        child: ScopeParent,
    ) -> Result<(), GraphError> {
        let children = &mut self.packages[parent].children;
        if children.contains_key(&name) {
            return Err(GraphError::DuplicateChild { name });
        }
        children.insert(name, child);
        Ok(())
    }

    /// Declare a struct
    pub fn add_struct(&mut self, name: Symbol, parent: ScopeParent) -> AggregateId {
        self.add_aggregate(name, AggregateKind::Struct, parent)
    }

    /// Declare a class
    pub fn add_class(&mut self, name: Symbol, parent: ScopeParent) -> AggregateId {
        self.add_aggregate(name, AggregateKind::Class, parent)
    }

    fn add_aggregate(&mut self, name: Symbol, kind: AggregateKind, parent: ScopeParent) -> AggregateId {
        self.aggregates.alloc(Aggregate {
            name,
            kind,
            parent,
            bases: Vec::new(),
            is_deprecated: false,
            members: FxHashMap::default(),
        })
    }

    /// Add a base-class edge to a class, in declaration order
    ///
    /// Rejects edges that would make the hierarchy cyclic.
    pub fn add_base(
        &mut self,
        derived: AggregateId,
        base: AggregateId,
        protection: Protection,
    ) -> Result<(), GraphError> {
        let name = self.aggregates[derived].name;
        if self.aggregates[derived].kind == AggregateKind::Struct {
            return Err(GraphError::BaseOnStruct { name });
        }
        if base == derived || self.inherits_from(base, derived) {
            return Err(GraphError::BaseCycle { name });
        }
        self.aggregates[derived]
            .bases
            .push(BaseEdge { base, protection });
        Ok(())
    }

    /// Whether `target` is reachable from `from` over base edges
    fn inherits_from(&self, from: AggregateId, target: AggregateId) -> bool {
        self.aggregates[from]
            .bases
            .iter()
            .any(|edge| edge.base == target || self.inherits_from(edge.base, target))
    }

    /// Declare a member inside an aggregate
    pub fn add_member(
        &mut self,
        owner: AggregateId,
        name: Symbol,
        protection: Protection,
        kind: MemberKind,
        loc: Loc,
    ) -> Result<MemberId, GraphError> {
        if self.aggregates[owner].members.contains_key(&name) {
            return Err(GraphError::DuplicateMember { name });
        }
        let id = self.members.alloc(Member {
            name,
            parent: ScopeParent::Aggregate(owner),
            protection,
            kind,
            is_static: false,
            is_deprecated: false,
            loc,
        });
        self.aggregates[owner].members.insert(name, id);
        Ok(id)
    }

    /// Declare a free-standing declaration at module scope
    pub fn add_decl(
        &mut self,
        module: ModuleId,
        name: Symbol,
        protection: Protection,
        kind: MemberKind,
        loc: Loc,
    ) -> Result<MemberId, GraphError> {
        if self.modules[module].decls.contains_key(&name) {
            return Err(GraphError::DuplicateDecl { name });
        }
        let id = self.members.alloc(Member {
            name,
            parent: ScopeParent::Module(module),
            protection,
            kind,
            is_static: false,
            is_deprecated: false,
            loc,
        });
        self.modules[module].decls.insert(name, id);
        Ok(id)
    }

    /// Declare a function for caller-side scope tracking
    pub fn add_function(&mut self, name: Symbol, parent: ScopeParent) -> FunctionId {
        self.functions.alloc(Function {
            name,
            parent,
            is_deprecated: false,
        })
    }

    pub fn package(&self, id: PackageId) -> &Package {
        &self.packages[id]
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id]
    }

    pub fn aggregate(&self, id: AggregateId) -> &Aggregate {
        &self.aggregates[id]
    }

    pub fn member(&self, id: MemberId) -> &Member {
        &self.members[id]
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id]
    }

    /// Mark a member as static
    pub fn set_static(&mut self, id: MemberId) {
        self.members[id].is_static = true;
    }

    /// Mark a member as deprecated
    pub fn deprecate_member(&mut self, id: MemberId) {
        self.members[id].is_deprecated = true;
    }

    /// Mark an aggregate as deprecated
    pub fn deprecate_aggregate(&mut self, id: AggregateId) {
        self.aggregates[id].is_deprecated = true;
    }

    /// Mark a function as deprecated
    pub fn deprecate_function(&mut self, id: FunctionId) {
        self.functions[id].is_deprecated = true;
    }

    /// Look up a package child by name
    pub fn find_child(&self, package: PackageId, name: Symbol) -> Option<ScopeParent> {
        self.packages[package].children.get(&name).copied()
    }

    /// Look up a member of an aggregate by name; bases are not searched
    pub fn find_member(&self, aggregate: AggregateId, name: Symbol) -> Option<MemberId> {
        self.aggregates[aggregate].members.get(&name).copied()
    }

    /// Look up a module-level declaration by name
    pub fn find_decl(&self, module: ModuleId, name: Symbol) -> Option<MemberId> {
        self.modules[module].decls.get(&name).copied()
    }

    /// The module a symbol's enclosing chain reaches first
    ///
    /// Walks outward through functions and aggregates. `None` when the
    /// chain ends at a package without passing through a module.
    pub fn access_module(&self, mut symbol: ScopeParent) -> Option<ModuleId> {
        loop {
            match symbol {
                ScopeParent::Module(id) => return Some(id),
                ScopeParent::Package(_) => return None,
                ScopeParent::Aggregate(id) => symbol = self.aggregates[id].parent,
                ScopeParent::Function(id) => symbol = self.functions[id].parent,
            }
        }
    }

    /// Nearest package of a module
    ///
    /// A module that doubles as a package node is its own nearest package;
    /// otherwise it is the parent package, if any.
    pub fn nearest_package(&self, module: ModuleId) -> Option<PackageId> {
        let module = &self.modules[module];
        module.as_package.or(module.parent)
    }

    /// Nearest package on a symbol's enclosing chain
    pub fn nearest_package_of(&self, mut symbol: ScopeParent) -> Option<PackageId> {
        loop {
            match symbol {
                ScopeParent::Package(id) => return Some(id),
                ScopeParent::Module(id) => return self.nearest_package(id),
                ScopeParent::Aggregate(id) => symbol = self.aggregates[id].parent,
                ScopeParent::Function(id) => symbol = self.functions[id].parent,
            }
        }
    }

    /// Whether `ancestor` appears on the parent chain starting at `from`
    pub fn is_ancestor_package(&self, ancestor: PackageId, from: Option<PackageId>) -> bool {
        let mut current = from;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.packages[id].parent;
        }
        false
    }
}
