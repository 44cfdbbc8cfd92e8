use std::sync::Arc;

use ynab_api::Transport;

use crate::account::GetAccountsTool;
use crate::budget::GetBudgetsTool;
use crate::category::{
    GetCategoriesTool, GetCategoryForMonthTool, UpdateCategoryForMonthTool, UpdateCategoryTool,
};
use crate::month::GetMonthsTool;
use crate::payee::GetPayeesTool;
use crate::transaction::{
    DeleteTransactionTool, GetAllTransactionsTool, GetTransactionTool,
    GetTransactionsForAccountTool, GetTransactionsForCategoryTool, GetTransactionsForMonthTool,
    GetTransactionsForPayeeTool, NewTransactionTool, UpdateTransactionTool,
};
use crate::user::GetUserTool;
use crate::ToolManager;

/// Wires every resource tool to one shared transport.
pub fn create_tool_manager(transport: Arc<dyn Transport>) -> ToolManager {
    let mut tool_manager = ToolManager::new();

    tool_manager.register_tool(Box::new(GetUserTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(GetBudgetsTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(GetAccountsTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(GetMonthsTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(GetPayeesTool::new(transport.clone())));

    tool_manager.register_tool(Box::new(GetCategoriesTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(GetCategoryForMonthTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(UpdateCategoryTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(UpdateCategoryForMonthTool::new(transport.clone())));

    tool_manager.register_tool(Box::new(GetAllTransactionsTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(GetTransactionTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(GetTransactionsForCategoryTool::new(
        transport.clone(),
    )));
    tool_manager.register_tool(Box::new(GetTransactionsForAccountTool::new(
        transport.clone(),
    )));
    tool_manager.register_tool(Box::new(GetTransactionsForMonthTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(GetTransactionsForPayeeTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(NewTransactionTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(UpdateTransactionTool::new(transport.clone())));
    tool_manager.register_tool(Box::new(DeleteTransactionTool::new(transport)));

    tool_manager
}
