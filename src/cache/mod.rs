//! 缓存层
//!
//! 通过注册表提供可插拔的对象缓存后端（Moka 内存缓存 / Redis）。
//! 后端在编译单元加载时通过 `declare_object_cache_plugin!` 自注册。

pub mod object_cache;
pub mod register;
mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并自注册一个对象缓存插件
///
/// 用法：`declare_object_cache_plugin!("moka", MokaCacheWrapper);`
/// 要求类型提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $ty:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        let fut: $crate::cache::register::BoxedObjectCacheFuture =
                            Box::pin(async {
                                let cache = $ty::new()
                                    .map_err($crate::errors::LearnifyError::cache_connection)?;
                                Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                            });
                        fut
                    }),
                );
            }
        }
    };
}
