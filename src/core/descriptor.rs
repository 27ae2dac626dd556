// src/core/descriptor.rs

use std::any::{TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use thiserror::Error;

use crate::command::CommandType;
use crate::models::CommandDescriptor;

/// Errores de configuración: la tabla declarada de un comando es inválida.
/// No dependen de los argumentos recibidos.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Command '{command}' declares more than one argument at position {position}.")]
    DuplicatePosition { command: String, position: usize },
    #[error("Command '{command}' has a gap in its argument positions: expected {expected}, found {found}.")]
    PositionGap {
        command: String,
        expected: usize,
        found: usize,
    },
    #[error("Command '{command}' declares overlapping option templates '{first}' and '{second}'.")]
    DuplicateTemplate {
        command: String,
        first: String,
        second: String,
    },
    #[error("Command '{command}' declares the option template '{template}' with an empty alias.")]
    EmptyTemplate { command: String, template: String },
    #[error("Command type '{0}' reaches itself through its parent chain.")]
    CyclicParent(&'static str),
}

type DescriptorResult = Result<Arc<CommandDescriptor>, DescriptorError>;
type Cell = Arc<OnceLock<DescriptorResult>>;

static CACHE: OnceLock<Mutex<HashMap<TypeId, Cell>>> = OnceLock::new();

thread_local! {
    // Tipos cuyo descriptor se está construyendo en este hilo (detección de ciclos).
    static BUILDING: RefCell<Vec<TypeId>> = const { RefCell::new(Vec::new()) };
}

fn cell_for(type_id: TypeId) -> Cell {
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cells = cache.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cells.entry(type_id).or_default())
}

/// Devuelve el descriptor de `C`, construyéndolo la primera vez.
///
/// Cada tipo tiene su propia celda `OnceLock`: el candado del mapa solo se
/// toma para obtener la celda, de modo que construir un descriptor (que a su
/// vez pide el del padre) nunca lo retiene, y dos hilos que piden el mismo
/// tipo a la vez esperan a una única construcción.
///
/// La detección de ciclos es por hilo. Si dos hilos piden a la vez, y por
/// primera vez, las dos mitades de un ciclo de padres, cada uno espera la
/// celda del otro y no terminan. Resolver el árbol desde un solo hilo antes
/// (por ejemplo con `Registry::register`) evita el caso.
pub fn descriptor<C: CommandType>() -> DescriptorResult {
    let type_id = TypeId::of::<C>();

    let reentrant = BUILDING.with(|stack| stack.borrow().contains(&type_id));
    if reentrant {
        return Err(DescriptorError::CyclicParent(type_name::<C>()));
    }

    let cell = cell_for(type_id);
    cell.get_or_init(|| {
        BUILDING.with(|stack| stack.borrow_mut().push(type_id));
        log::debug!("Construyendo descriptor para {}", type_name::<C>());
        let built = C::describe().finish().map(Arc::new);
        BUILDING.with(|stack| stack.borrow_mut().pop());

        if let Err(e) = &built {
            log::warn!("Descriptor inválido para {}: {}", type_name::<C>(), e);
        }
        built
    })
    .clone()
}
