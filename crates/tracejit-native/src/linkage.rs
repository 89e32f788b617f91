//! Makes the vmmath helpers visible to Cranelift-generated code.

use cranelift_codegen::ir::{types, AbiParam, Signature};
use cranelift_jit::JITBuilder;
use cranelift_module::{FuncId, Linkage, Module};

use tracejit_vmmath::{helper_symbols, HelperSig, HelperSymbol};

use crate::NativeError;

/// Registers the address of every exported helper with the JIT linker, so
/// imports resolve without going through the dynamic symbol table.
pub fn register_helpers(builder: &mut JITBuilder) -> Vec<HelperSymbol> {
    let symbols = helper_symbols();
    for sym in &symbols {
        log::trace!("Registering helper {} at {:p}", sym.name, sym.addr);
        builder.symbol(sym.name, sym.addr);
    }
    symbols
}

/// Builds the native-ABI signature for a helper of the given shape.
pub fn helper_signature<M: Module>(module: &M, sig: HelperSig) -> Signature {
    let mut signature = module.make_signature();
    let (params, ret) = match sig {
        HelperSig::IntIntToInt => (vec![types::I32, types::I32], types::I32),
        HelperSig::FloatIntToFloat => (vec![types::F64, types::I32], types::F64),
        HelperSig::FloatTagToFloat => (vec![types::F64, types::I32], types::F64),
        HelperSig::FloatToFloat => (vec![types::F64], types::F64),
    };
    signature.params.extend(params.into_iter().map(AbiParam::new));
    signature.returns.push(AbiParam::new(ret));
    signature
}

/// Declares `sym` as an imported function in `module`.
pub fn declare_helper<M: Module>(module: &mut M, sym: &HelperSymbol) -> Result<FuncId, NativeError> {
    let signature = helper_signature(module, sym.sig);
    Ok(module.declare_function(sym.name, Linkage::Import, &signature)?)
}
