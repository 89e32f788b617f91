//! A JIT module that calls each helper from generated machine code.
//!
//! For every exported helper a trampoline with the helper's own signature is
//! compiled. The trampoline does nothing but call the imported helper, so
//! invoking it exercises exactly the call sequence a trace would emit.

use std::mem;

use cranelift_codegen::ir::InstBuilder;
use cranelift_codegen::settings::{self, Configurable};
use cranelift_frontend::{FunctionBuilder, FunctionBuilderContext};
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{default_libcall_names, FuncId, Linkage, Module};
use rustc_hash::FxHashMap;

use tracejit_ir::FpmOp;
use tracejit_vmmath::platform;
use tracejit_vmmath::{HelperSig, HelperSymbol};

use crate::linkage::{declare_helper, helper_signature, register_helpers};
use crate::NativeError;

#[derive(Debug, Clone, Copy)]
struct Trampoline {
    code: *const u8,
    sig: HelperSig,
}

/// Owns the compiled trampolines. Code pointers stay valid for the lifetime
/// of this value.
pub struct HelperJit {
    #[allow(dead_code)] // Owns the executable memory behind `trampolines`.
    module: JITModule,
    trampolines: FxHashMap<&'static str, Trampoline>,
}

impl HelperJit {
    /// Creates a host JIT, links the helpers and compiles one trampoline per
    /// helper.
    pub fn new() -> Result<Self, NativeError> {
        platform::log_capabilities();

        let mut flag_builder = settings::builder();
        flag_builder.set("use_colocated_libcalls", "false")?;
        flag_builder.set("is_pic", "false")?;
        #[cfg(debug_assertions)]
        flag_builder.set("enable_verifier", "true")?;
        let flags = settings::Flags::new(flag_builder);

        let isa_builder = cranelift_native::builder()
            .map_err(|e| NativeError::IsaSetupError(format!("Host target lookup failed: {}", e)))?;
        let isa = isa_builder
            .finish(flags)
            .map_err(|e| NativeError::IsaSetupError(format!("ISA construction failed: {}", e)))?;
        log::debug!("HelperJit targeting {}", isa.triple());

        let mut builder = JITBuilder::with_isa(isa, default_libcall_names());
        let symbols = register_helpers(&mut builder);
        let mut module = JITModule::new(builder);

        let mut declared = Vec::with_capacity(symbols.len());
        for sym in &symbols {
            let trampoline = compile_trampoline(&mut module, sym)?;
            declared.push((sym.name, sym.sig, trampoline));
        }
        module.finalize_definitions()?;

        let trampolines = declared
            .into_iter()
            .map(|(name, sig, id)| {
                let code = module.get_finalized_function(id);
                (name, Trampoline { code, sig })
            })
            .collect();

        Ok(HelperJit { module, trampolines })
    }

    /// Names of the helpers reachable through this JIT.
    pub fn helper_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.trampolines.keys().copied()
    }

    fn trampoline(&self, name: &str, expected: HelperSig) -> Result<*const u8, NativeError> {
        let trampoline = self
            .trampolines
            .get(name)
            .ok_or_else(|| NativeError::UnknownHelper(name.to_string()))?;
        if trampoline.sig != expected {
            return Err(NativeError::SignatureMismatch {
                name: name.to_string(),
                expected,
                actual: trampoline.sig,
            });
        }
        Ok(trampoline.code)
    }

    /// `tracejit_vm_modi` called from JIT code. `b` must be non-zero.
    pub fn modi(&self, a: i32, b: i32) -> Result<i32, NativeError> {
        let code = self.trampoline("tracejit_vm_modi", HelperSig::IntIntToInt)?;
        // SAFETY: compiled with the (i32, i32) -> i32 native signature.
        let func: extern "C" fn(i32, i32) -> i32 = unsafe { mem::transmute(code) };
        Ok(func(a, b))
    }

    /// `tracejit_vm_powi` called from JIT code.
    pub fn powi(&self, x: f64, k: i32) -> Result<f64, NativeError> {
        let code = self.trampoline("tracejit_vm_powi", HelperSig::FloatIntToFloat)?;
        // SAFETY: compiled with the (f64, i32) -> f64 native signature.
        let func: extern "C" fn(f64, i32) -> f64 = unsafe { mem::transmute(code) };
        Ok(func(x, k))
    }

    /// `tracejit_vm_foldfpm` called from JIT code. The helper aborts the
    /// process on [`FpmOp::Other`], so that request is never forwarded.
    pub fn foldfpm(&self, x: f64, op: FpmOp) -> Result<f64, NativeError> {
        if op == FpmOp::Other {
            return Err(NativeError::UnsupportedFpm(op));
        }
        let code = self.trampoline("tracejit_vm_foldfpm", HelperSig::FloatTagToFloat)?;
        // SAFETY: compiled with the (f64, i32) -> f64 native signature; the
        // tag is passed as a 32-bit integer either way.
        let func: extern "C" fn(f64, u32) -> f64 = unsafe { mem::transmute(code) };
        Ok(func(x, op.tag()))
    }

    /// Any `(f64) -> f64` helper by exported name.
    pub fn unary(&self, name: &str, x: f64) -> Result<f64, NativeError> {
        let code = self.trampoline(name, HelperSig::FloatToFloat)?;
        // SAFETY: compiled with the (f64) -> f64 native signature.
        let func: extern "C" fn(f64) -> f64 = unsafe { mem::transmute(code) };
        Ok(func(x))
    }
}

/// Defines `<helper>_trampoline`, forwarding its arguments to the imported
/// helper and returning its result.
fn compile_trampoline(module: &mut JITModule, sym: &HelperSymbol) -> Result<FuncId, NativeError> {
    let callee = declare_helper(module, sym)?;
    let signature = helper_signature(module, sym.sig);
    let name = format!("{}_trampoline", sym.name);
    let func_id = module.declare_function(&name, Linkage::Local, &signature)?;

    let mut ctx = module.make_context();
    ctx.func.signature = signature;
    let mut fn_ctx = FunctionBuilderContext::new();
    {
        let mut builder = FunctionBuilder::new(&mut ctx.func, &mut fn_ctx);
        let entry = builder.create_block();
        builder.append_block_params_for_function_params(entry);
        builder.switch_to_block(entry);
        builder.seal_block(entry);

        let args = builder.block_params(entry).to_vec();
        let callee_ref = module.declare_func_in_func(callee, builder.func);
        let call = builder.ins().call(callee_ref, &args);
        let results = builder.inst_results(call).to_vec();
        builder.ins().return_(&results);
        builder.finalize();
    }

    module.define_function(func_id, &mut ctx)?;
    module.clear_context(&mut ctx);
    log::trace!("Compiled trampoline {}", name);
    Ok(func_id)
}
