//! Actor context
//!
//! 认证机制在上游会话层；这里只消费它注入的身份头并做角色守卫。
//!
//! | Header | 含义 |
//! |--------|------|
//! | `x-actor-id` | 操作者 ID |
//! | `x-actor-name` | 操作者名称 (可选，默认同 ID) |
//! | `x-actor-role` | 角色: CUSTOMER / SERVANT / CHEF / ADMIN |

mod actor;
mod middleware;

pub use actor::CurrentActor;
pub use middleware::{actor_context, require_roles};
