//! Operator-facing copy. The backend and its users are Spanish-speaking, so
//! the strings stay in Spanish.

pub const APP_TITLE: &str = "BUILD-YOUR-TECH";
pub const PAGE_TITLE: &str = "Gestión de Usuarios";
pub const TABLE_TITLE: &str = "Todos los Usuarios";
pub const EMPTY_TABLE: &str = "No hay usuarios disponibles";
pub const ID_PLACEHOLDER: &str = "ID de usuario";

pub const INVALID_ID: &str = "Por favor ingrese un ID de usuario válido.";
pub const USER_NOT_FOUND: &str = "Usuario no encontrado";
pub const INVALID_ROLE: &str = "Por favor ingrese un rol numérico.";
pub const CREATE_FAILED: &str = "Error al crear el usuario";
pub const UPDATE_FAILED: &str = "Error al actualizar el usuario";
pub const DELETE_FAILED: &str = "Error al eliminar el usuario";

pub const CONFIRM_CREATE: &str = "¿Seguro que quieres crear el nuevo usuario?";
pub const CONFIRM_UPDATE: &str = "¿Seguro que quieres confirmar los cambios?";
pub const CONFIRM_DELETE: &str = "¿Seguro que quieres eliminar el usuario?";

pub const ACTION_CREATE: &str = "Crear";
pub const ACTION_EDIT: &str = "Editar";
pub const ACTION_DELETE: &str = "Eliminar";
pub const BUTTON_CONFIRM: &str = "Confirmar";
pub const BUTTON_CANCEL: &str = "Cancelar";

pub const LOGIN: &str = "Iniciar sesión";
pub const LOGOUT: &str = "Cerrar sesión";
pub const CART: &str = "Carrito";
