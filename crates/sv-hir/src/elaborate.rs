//! Syntax → symbol materialization (§4.F) and generate-construct expansion (§G).
use tracing::{debug, warn};

use sv_diagnostics::{Diagnostic, DiagnosticSink};
use sv_syntax::Kind;

use crate::binder::{Binder, BinderOutcome};
use crate::compilation::Compilation;
use crate::definition::Definition;
use crate::scope::{LookupLocation, Scope};
use crate::symbol::{ProcedureKind, Symbol, SymbolKind};
use crate::syntax::{
    BlockStatementSyntax, CompilationUnitSyntax, HierarchyInstantiationSyntax, IfGenerateSyntax,
    LoopGenerateSyntax, ModuleDeclarationSyntax, ProceduralBlockSyntax,
};

/// The outcome of one elaboration step: a materialized symbol, a
/// cooperative abort from the binder, or a placeholder standing in for a
/// subtree whose elaboration failed (§7: "a failed elaboration yields a
/// partial symbol graph with the failing subtree replaced by a placeholder
/// symbol").
#[derive(Debug)]
pub enum ElaborationOutcome<T> {
    /// Elaboration produced `T`.
    Symbol(T),
    /// The binder signaled cancellation; the caller should stop publishing
    /// this subtree.
    Aborted,
    /// Elaboration of this subtree failed; a placeholder was published
    /// instead and a diagnostic was already reported.
    Placeholder,
}

impl<T> ElaborationOutcome<T> {
    /// Returns the contained symbol, if elaboration succeeded.
    pub fn symbol(self) -> Option<T> {
        match self {
            Self::Symbol(value) => Some(value),
            Self::Aborted | Self::Placeholder => None,
        }
    }
}

/// `CompilationUnitSymbol.fromSyntax` (§4.F): constructed once per
/// compilation unit; name is empty; parent is `$root`; members are
/// populated in source order from top-level declarations.
pub struct CompilationUnitSymbol;

impl CompilationUnitSymbol {
    /// Elaborates one compilation unit and registers it with `compilation`.
    pub fn from_syntax<'a, K: Kind>(
        compilation: &Compilation<'a, K>,
        syntax: CompilationUnitSyntax<'a, K>,
    ) -> &'a Symbol<'a, K> {
        let arena = compilation.arena();
        let scope: &'a Scope<'a, K> = arena.alloc(Scope::new());
        let unit: &'a Symbol<'a, K> = arena.alloc(Symbol::new(
            SymbolKind::CompilationUnit,
            "",
            sv_diagnostics::Span::empty(0),
            Some(compilation.root_scope()),
            Some(scope),
        ));
        scope.bind_owner(unit);

        debug!(items = syntax.top_level_items.len(), "elaborating compilation unit");
        for _item in syntax.top_level_items {
            // Top-level declarations (module/interface/program/package
            // headers) are pre-elaboration `Definition`s, not symbols in
            // their own right until instantiated or opened as a
            // `PackageSymbol` — registering them is the concern of the
            // `Binder::lookup_definition` collaborator's backing store,
            // external to this core.
        }

        compilation.add_compilation_unit(unit);
        unit
    }
}

/// `PackageSymbol.fromSyntax(ModuleDeclarationSyntax)` (§4.F): name taken
/// from the header; members populated from the body; parameters are
/// permitted but never propagate to instances (packages are not
/// instantiated).
pub struct PackageSymbol;

impl PackageSymbol {
    /// Elaborates a package declaration into `parent_scope`.
    pub fn from_syntax<'a, K: Kind>(
        compilation: &Compilation<'a, K>,
        syntax: ModuleDeclarationSyntax<'a, K>,
        parent_scope: &'a Scope<'a, K>,
    ) -> &'a Symbol<'a, K> {
        let arena = compilation.arena();
        let scope: &'a Scope<'a, K> = arena.alloc(Scope::new());
        let package: &'a Symbol<'a, K> = arena.alloc(Symbol::new(
            SymbolKind::Package,
            syntax.name.text(),
            syntax.name.span(),
            Some(parent_scope),
            Some(scope),
        ));
        scope.bind_owner(package);
        parent_scope.add_member(&mut *compilation.sink(), package);
        package
    }
}

/// `InstanceSymbol.fromSyntax` and `.populate` (§4.F).
pub struct InstanceSymbol;

impl InstanceSymbol {
    /// Resolves the referenced `Definition`, computes `ParameterMetadata`
    /// for each instance name in `syntax`, and appends the created symbols
    /// to `out_results` in source order.
    pub fn from_syntax<'a, K: Kind>(
        compilation: &Compilation<'a, K>,
        syntax: HierarchyInstantiationSyntax<'a, K>,
        location: LookupLocation<'a, K>,
        scope: &'a Scope<'a, K>,
        binder: &dyn Binder<'a, K>,
        out_results: &mut Vec<&'a Symbol<'a, K>>,
    ) -> ElaborationOutcome<()> {
        compilation.record_instantiation(syntax.definition_name.text());

        let definition = match binder.lookup_definition(syntax.definition_name.text(), scope) {
            BinderOutcome::Value(definition) => definition,
            BinderOutcome::Aborted => return ElaborationOutcome::Aborted,
            BinderOutcome::Error => {
                compilation.sink().report(
                    Diagnostic::error(format!(
                        "unknown definition `{}`",
                        syntax.definition_name.text()
                    ))
                    .with_code("unknown-name")
                    .with_label(String::new(), syntax.definition_name.span()),
                );
                return ElaborationOutcome::Placeholder;
            }
        };

        let overrides = match binder.resolve_overrides(syntax.overrides, &definition) {
            BinderOutcome::Value(overrides) => overrides,
            BinderOutcome::Aborted => return ElaborationOutcome::Aborted,
            BinderOutcome::Error => {
                compilation.sink().report(
                    Diagnostic::error("failed to resolve parameter overrides")
                        .with_code("constant-evaluation-failure")
                        .with_label(String::new(), syntax.definition_name.span()),
                );
                return ElaborationOutcome::Placeholder;
            }
        };

        for instance_name in syntax.instance_names {
            let instance = Self::populate(compilation, &definition, &overrides, *instance_name, scope);
            location.scope().add_member(&mut *compilation.sink(), instance);
            out_results.push(instance);
        }

        ElaborationOutcome::Symbol(())
    }

    /// Builds one instance symbol, with a fresh scope whose members are
    /// cloned-by-reference from `definition.body` with `overrides`
    /// substituted. The substitution itself is the binder's concern; this
    /// core's only invariant is that symbol identities inside one instance
    /// never alias those of another instance (§4.F `populate`).
    fn populate<'a, K: Kind>(
        compilation: &Compilation<'a, K>,
        definition: &Definition<'a, K>,
        overrides: &[(&'a str, i64)],
        instance_name: sv_syntax::Token<'a, K>,
        parent_scope: &'a Scope<'a, K>,
    ) -> &'a Symbol<'a, K> {
        let arena = compilation.arena();
        // "clones (by reference)": the instance's scope shares the
        // definition's body syntax rather than deep-copying it; member
        // substitution with the bound parameters is the binder's concern.
        let instance_scope: &'a Scope<'a, K> = arena.alloc(Scope::with_statement_body(definition.body));
        let instance: &'a Symbol<'a, K> = arena.alloc(Symbol::new(
            SymbolKind::ModuleInstance,
            instance_name.text(),
            instance_name.span(),
            Some(parent_scope),
            Some(instance_scope),
        ));
        instance_scope.bind_owner(instance);

        for (name, value) in overrides {
            let bound: &'a Symbol<'a, K> =
                arena.alloc(Symbol::new_parameter(name, instance_name.span(), Some(instance_scope), *value));
            instance_scope.add_member(&mut *compilation.sink(), bound);
        }

        instance
    }
}

/// `SequentialBlockSymbol.fromSyntax(BlockStatementSyntax)` (§4.F): name
/// from the optional label; the statement tree lives on the embedded
/// statement-bodied scope.
pub struct SequentialBlockSymbol;

impl SequentialBlockSymbol {
    /// Elaborates a labeled or anonymous `begin ... end` block.
    pub fn from_syntax<'a, K: Kind>(
        compilation: &Compilation<'a, K>,
        syntax: BlockStatementSyntax<'a, K>,
        parent_scope: &'a Scope<'a, K>,
    ) -> &'a Symbol<'a, K> {
        let arena = compilation.arena();
        let scope: &'a Scope<'a, K> = arena.alloc(Scope::with_statement_body(syntax.syntax));
        let name = syntax.label.map(|token| token.text()).unwrap_or("");
        let location = syntax.label.map(|token| token.span()).unwrap_or_else(|| syntax.syntax.span());
        let block: &'a Symbol<'a, K> = arena.alloc(Symbol::new(
            SymbolKind::SequentialBlock,
            name,
            location,
            Some(parent_scope),
            Some(scope),
        ));
        scope.bind_owner(block);
        parent_scope.add_member(&mut *compilation.sink(), block);
        block
    }
}

/// `ProceduralBlockSymbol.fromSyntax(ProceduralBlockSyntax)` (§4.F): records
/// `procedureKind` and stores the body.
pub struct ProceduralBlockSymbol;

impl ProceduralBlockSymbol {
    /// Elaborates an `initial`/`always*`/`final` block.
    pub fn from_syntax<'a, K: Kind>(
        compilation: &Compilation<'a, K>,
        syntax: ProceduralBlockSyntax<'a, K>,
        parent_scope: &'a Scope<'a, K>,
    ) -> &'a Symbol<'a, K> {
        let arena = compilation.arena();
        let scope: &'a Scope<'a, K> = arena.alloc(Scope::with_statement_body(syntax.syntax));
        let block: &'a Symbol<'a, K> = arena.alloc(Symbol::new(
            SymbolKind::ProceduralBlock(syntax.procedure_kind),
            "",
            syntax.syntax.span(),
            Some(parent_scope),
            Some(scope),
        ));
        scope.bind_owner(block);
        parent_scope.add_member(&mut *compilation.sink(), block);
        block
    }
}

/// `GenerateBlockSymbol.fromSyntax(IfGenerateSyntax, location, parent)`
/// (§4.F, §8 scenario 4).
pub struct GenerateBlockSymbol;

impl GenerateBlockSymbol {
    /// Evaluates the guard as a constant and elaborates whichever branch
    /// (if any) is selected. Returns `Symbol(None)` — not `Placeholder` —
    /// when the guard is false and there is no else branch: that is a
    /// legitimate "nothing here" outcome, not a failure (§8 scenario 4:
    /// "parent scope has no new member").
    pub fn from_syntax<'a, K: Kind>(
        compilation: &Compilation<'a, K>,
        syntax: IfGenerateSyntax<'a, K>,
        location: LookupLocation<'a, K>,
        parent_scope: &'a Scope<'a, K>,
        binder: &dyn Binder<'a, K>,
    ) -> ElaborationOutcome<Option<&'a Symbol<'a, K>>> {
        let guard_value = match binder.evaluate_constant(syntax.guard, location.scope()) {
            BinderOutcome::Value(value) => value,
            BinderOutcome::Aborted => return ElaborationOutcome::Aborted,
            BinderOutcome::Error => {
                compilation.sink().report(
                    Diagnostic::error("if-generate guard is not a constant")
                        .with_code("constant-evaluation-failure")
                        .with_label(String::new(), syntax.guard.span()),
                );
                return ElaborationOutcome::Placeholder;
            }
        };

        let chosen_branch = if guard_value != 0 {
            Some(syntax.then_branch)
        } else {
            syntax.else_branch
        };

        let Some(branch) = chosen_branch else {
            debug!("if-generate guard false with no else branch");
            return ElaborationOutcome::Symbol(None);
        };

        let arena = compilation.arena();
        let scope: &'a Scope<'a, K> = arena.alloc(Scope::new());
        let name = syntax.label.map(|token| token.text()).unwrap_or("");
        let location_span = syntax.label.map(|token| token.span()).unwrap_or_else(|| branch.span());
        let block: &'a Symbol<'a, K> = arena.alloc(Symbol::new(
            SymbolKind::GenerateBlock,
            name,
            location_span,
            Some(parent_scope),
            Some(scope),
        ));
        scope.bind_owner(block);
        parent_scope.add_member(&mut *compilation.sink(), block);
        ElaborationOutcome::Symbol(Some(block))
    }
}

/// `GenerateBlockArraySymbol.fromSyntax(LoopGenerateSyntax, location,
/// parent)` (§4.F, §8 scenario 5).
pub struct GenerateBlockArraySymbol;

impl GenerateBlockArraySymbol {
    /// Evaluates `init`/`condition`/`step` and iterates while `condition`
    /// is true, creating one `GenerateBlockSymbol` child per iteration,
    /// each exposing an implicit genvar-bound `Parameter` symbol.
    pub fn from_syntax<'a, K: Kind>(
        compilation: &Compilation<'a, K>,
        syntax: LoopGenerateSyntax<'a, K>,
        location: LookupLocation<'a, K>,
        parent_scope: &'a Scope<'a, K>,
        binder: &dyn Binder<'a, K>,
    ) -> ElaborationOutcome<&'a Symbol<'a, K>> {
        let arena = compilation.arena();
        let array_scope: &'a Scope<'a, K> = arena.alloc(Scope::new());
        let name = syntax.label.map(|token| token.text()).unwrap_or("");
        let array: &'a Symbol<'a, K> = arena.alloc(Symbol::new(
            SymbolKind::GenerateBlockArray,
            name,
            syntax.body.span(),
            Some(parent_scope),
            Some(array_scope),
        ));
        array_scope.bind_owner(array);

        let mut current = match binder.evaluate_constant(syntax.init, location.scope()) {
            BinderOutcome::Value(value) => value,
            BinderOutcome::Aborted => return ElaborationOutcome::Aborted,
            BinderOutcome::Error => {
                compilation.sink().report(
                    Diagnostic::error("loop-generate initializer is not a constant")
                        .with_code("constant-evaluation-failure")
                        .with_label(String::new(), syntax.init.span()),
                );
                return ElaborationOutcome::Placeholder;
            }
        };

        let cap = compilation.config().iteration_cap();
        let mut iterations: u32 = 0;

        loop {
            // One iteration's genvar binding lives in a throwaway scope so
            // the binder can resolve the genvar name when it evaluates
            // `condition`/`step` against it.
            let genvar_scope: &'a Scope<'a, K> = arena.alloc(Scope::new());
            genvar_scope.bind_owner(array);
            let genvar: &'a Symbol<'a, K> = arena.alloc(Symbol::new_parameter(
                syntax.genvar_name.text(),
                syntax.genvar_name.span(),
                Some(genvar_scope),
                current,
            ));
            genvar_scope.add_member(&mut *compilation.sink(), genvar);

            let condition_value = match binder.evaluate_constant(syntax.condition, genvar_scope) {
                BinderOutcome::Value(value) => value,
                BinderOutcome::Aborted => return ElaborationOutcome::Aborted,
                BinderOutcome::Error => {
                    compilation.sink().report(
                        Diagnostic::error("loop-generate condition is not a constant")
                            .with_code("constant-evaluation-failure")
                            .with_label(String::new(), syntax.condition.span()),
                    );
                    return ElaborationOutcome::Placeholder;
                }
            };
            if condition_value == 0 {
                break;
            }

            if iterations >= cap {
                warn!(cap, "loop-generate exceeded the iteration cap");
                compilation.sink().report(
                    Diagnostic::error(format!("loop-generate exceeded the iteration cap of {cap}"))
                        .with_code("iteration-cap-exceeded")
                        .with_label(String::new(), syntax.condition.span()),
                );
                return ElaborationOutcome::Placeholder;
            }

            let child_scope: &'a Scope<'a, K> = arena.alloc(Scope::new());
            let child: &'a Symbol<'a, K> = arena.alloc(Symbol::new(
                SymbolKind::GenerateBlock,
                "",
                syntax.body.span(),
                Some(array_scope),
                Some(child_scope),
            ));
            child_scope.bind_owner(child);
            array_scope.add_member(&mut *compilation.sink(), child);

            let bound_genvar: &'a Symbol<'a, K> = arena.alloc(Symbol::new_parameter(
                syntax.genvar_name.text(),
                syntax.genvar_name.span(),
                Some(child_scope),
                current,
            ));
            child_scope.add_member(&mut *compilation.sink(), bound_genvar);

            iterations += 1;

            current = match binder.evaluate_constant(syntax.step, genvar_scope) {
                BinderOutcome::Value(value) => value,
                BinderOutcome::Aborted => return ElaborationOutcome::Aborted,
                BinderOutcome::Error => {
                    compilation.sink().report(
                        Diagnostic::error("loop-generate step is not a constant")
                            .with_code("constant-evaluation-failure")
                            .with_label(String::new(), syntax.step.span()),
                    );
                    return ElaborationOutcome::Placeholder;
                }
            };
        }

        debug!(iterations, "elaborated loop-generate array");
        parent_scope.add_member(&mut *compilation.sink(), array);
        ElaborationOutcome::Symbol(array)
    }
}
