//! # 文件绑定适配器
//!
//! 把原生文件选择（对话框或前端传来的路径）桥接到共享表单状态中
//! 调用方指定的字段。每次选择变化时：
//! - 写入选中列表中的第一个文件
//! - 选择为空（如用户取消）时将字段置空，这不是错误
//! - 写入与变更通知在同一步完成，视图读取时一定能看到新值
//!
//! 新的选择整体替换旧文件，不保留旧文件的任何内容。

use std::path::Path;

use crate::error::ClientError;
use crate::models::file::SelectedFile;
use crate::models::form::FormState;
use crate::services::form::FormStore;

/// 写入目标字段的函数
pub type FieldSetter = fn(&mut FormState, Option<SelectedFile>);

/// 绑定到表单某个文件字段的适配器
#[derive(Clone, Copy)]
pub struct FileBinding {
    setter: FieldSetter,
}

impl FileBinding {
    pub fn new(setter: FieldSetter) -> Self {
        Self { setter }
    }

    /// 绑定到表单的源文件字段
    pub fn source_file() -> Self {
        Self::new(|state, file| state.source_file = file)
    }

    /// 处理一次选择变化
    pub fn on_change(&self, store: &FormStore, files: impl IntoIterator<Item = SelectedFile>) {
        let first = files.into_iter().next();
        match &first {
            Some(file) => log::debug!("绑定文件 {}（{} 字节）", file.file_name, file.size()),
            None => log::debug!("文件选择为空，清除绑定字段"),
        }
        let setter = self.setter;
        store.update(|state| setter(state, first));
    }

    /// 从磁盘路径读取文件后绑定，`None` 表示用户取消了选择
    ///
    /// # 错误
    /// 文件无法读取时返回 I/O 错误，此时表单字段保持不变
    pub async fn select_path(
        &self,
        store: &FormStore,
        path: Option<&Path>,
    ) -> Result<(), ClientError> {
        match path {
            Some(path) => {
                let file = SelectedFile::from_path(path).await?;
                self.on_change(store, [file]);
            }
            None => self.on_change(store, None::<SelectedFile>),
        }
        Ok(())
    }
}
