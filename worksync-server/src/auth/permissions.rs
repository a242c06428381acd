//! Permission Definitions
//!
//! 固定三角色 RBAC: employee / hr / admin。
//!
//! ## 设计原则
//! - 每次请求都按数据库中的角色重新判断，不信任令牌或客户端
//! - 查看自己的资料、工时、付款记录无需额外权限
//! - 付款审批、角色/状态/薪资变更仅 admin

use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use crate::auth::Actor;
use crate::security_log;

/// 受控操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 记录/编辑/删除自己的工时
    LogWork,
    /// 员工列表、详情
    ViewEmployees,
    /// 应付金额、是否有待审批付款
    ViewOwed,
    /// 全员工时进度
    ViewProgress,
    ToggleVerification,
    CreatePayment,
    /// 全部付款申请
    ViewPayroll,
    ApprovePayment,
    RejectPayment,
    ChangeRole,
    ChangeStatus,
    AdjustSalary,
    /// 联系表单收件箱
    ViewQueries,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogWork => "worksheet:write",
            Self::ViewEmployees => "employees:read",
            Self::ViewOwed => "payroll:owed",
            Self::ViewProgress => "worksheet:read_all",
            Self::ToggleVerification => "employees:verify",
            Self::CreatePayment => "payroll:create",
            Self::ViewPayroll => "payroll:read",
            Self::ApprovePayment => "payroll:approve",
            Self::RejectPayment => "payroll:reject",
            Self::ChangeRole => "employees:role",
            Self::ChangeStatus => "employees:status",
            Self::AdjustSalary => "employees:salary",
            Self::ViewQueries => "queries:read",
        }
    }

    /// 允许执行该操作的角色
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::LogWork => &[Role::Employee],
            Self::ViewEmployees
            | Self::ViewOwed
            | Self::ViewProgress
            | Self::ToggleVerification
            | Self::CreatePayment => &[Role::Hr, Role::Admin],
            Self::ViewPayroll
            | Self::ApprovePayment
            | Self::RejectPayment
            | Self::ChangeRole
            | Self::ChangeStatus
            | Self::AdjustSalary
            | Self::ViewQueries => &[Role::Admin],
        }
    }
}

/// 角色是否允许执行操作
pub fn is_allowed(role: Role, action: Action) -> bool {
    action.allowed_roles().contains(&role)
}

/// 检查操作者权限，拒绝时记录安全日志
pub fn authorize(actor: &Actor, action: Action) -> Result<(), AppError> {
    if is_allowed(actor.employee.role, action) {
        return Ok(());
    }

    security_log!(
        "WARN",
        "permission_denied",
        employee_id = actor.employee.id,
        role = actor.employee.role.as_str(),
        required_permission = action.as_str()
    );

    let code = if action.allowed_roles() == [Role::Admin] {
        ErrorCode::AdminRequired
    } else {
        ErrorCode::RoleRequired
    };
    Err(AppError::with_message(
        code,
        format!("Permission denied: {}", action.as_str()),
    )
    .with_detail("permission", action.as_str()))
}

impl Actor {
    pub fn authorize(&self, action: Action) -> Result<(), AppError> {
        authorize(self, action)
    }

    /// 访问自己的资源总是允许，否则需要 `action`
    pub fn authorize_self_or(&self, employee_id: i64, action: Action) -> Result<(), AppError> {
        if self.employee.id == employee_id {
            return Ok(());
        }
        authorize(self, action)
    }
}
