//! Report generation service.
//!
//! All reports aggregate the same input: the chart of accounts and the live
//! posted ledger lines. Classification goes through
//! [`crate::ledger::balance::NormalBalance`] exclusively, so every report
//! shares one sign convention.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ledgerly_shared::types::AccountId;
use ledgerly_shared::types::money::within_tolerance;
use rust_decimal::Decimal;

use crate::ledger::balance::AccountBalance;
use crate::ledger::types::AccountType;

use super::error::ReportError;
use super::types::{
    AccountRef, AccountStatementReport, BalanceSheetReport, BalanceSheetRow, BalanceSheetSection,
    IncomeStatementReport, IncomeStatementRow, IncomeStatementSection, LedgerLine, StatementEntry,
    TrialBalanceReport, TrialBalanceRow,
};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance: raw debit and credit totals per account
    /// over all lines dated on or before `as_of`.
    #[must_use]
    pub fn trial_balance(
        as_of: NaiveDate,
        accounts: &[AccountRef],
        lines: &[LedgerLine],
    ) -> TrialBalanceReport {
        let balances = Self::accumulate(lines.iter().filter(|l| l.date <= as_of));

        let mut rows: Vec<TrialBalanceRow> = accounts
            .iter()
            .filter_map(|account| {
                let balance = balances.get(&account.id)?;
                Some(TrialBalanceRow {
                    account_id: account.id,
                    code: account.code.clone(),
                    name: account.name.clone(),
                    total_debit: balance.total_debit,
                    total_credit: balance.total_credit,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));

        let total_debit: Decimal = rows.iter().map(|r| r.total_debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.total_credit).sum();

        TrialBalanceReport {
            as_of,
            rows,
            total_debit,
            total_credit,
            is_balanced: within_tolerance(total_debit, total_credit),
        }
    }

    /// Generates a balance sheet as of `as_of`.
    ///
    /// Revenue and expense balances over the same cutoff are folded into
    /// equity as a synthetic "Current period earnings" row, so a ledger of
    /// individually balanced transactions always produces a balanced sheet.
    #[must_use]
    pub fn balance_sheet(
        as_of: NaiveDate,
        accounts: &[AccountRef],
        lines: &[LedgerLine],
    ) -> BalanceSheetReport {
        let balances = Self::accumulate(lines.iter().filter(|l| l.date <= as_of));

        let mut assets = BalanceSheetSection::default();
        let mut liabilities = BalanceSheetSection::default();
        let mut equity = BalanceSheetSection::default();
        let mut net_income = Decimal::ZERO;

        for account in Self::sorted_by_code(accounts) {
            let Some(balance) = balances.get(&account.id) else {
                continue;
            };
            let signed = balance.signed(account.account_type.normal_balance());
            if signed.is_zero() {
                continue;
            }

            match account.account_type {
                AccountType::Asset => Self::push_row(&mut assets, account, signed),
                AccountType::Liability => Self::push_row(&mut liabilities, account, signed),
                AccountType::Equity => Self::push_row(&mut equity, account, signed),
                AccountType::Revenue => net_income += signed,
                AccountType::Expense => net_income -= signed,
            }
        }

        if !net_income.is_zero() {
            equity.total += net_income;
            equity.rows.push(BalanceSheetRow {
                account_id: None,
                name: "Current period earnings".to_string(),
                balance: net_income,
            });
        }

        let total_assets = assets.total;
        let liabilities_and_equity = liabilities.total + equity.total;

        BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            equity,
            net_income,
            total_assets,
            liabilities_and_equity,
            is_balanced: within_tolerance(total_assets, liabilities_and_equity),
        }
    }

    /// Generates an income statement over `[start, end]` (inclusive).
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `start > end`.
    pub fn income_statement(
        start: NaiveDate,
        end: NaiveDate,
        accounts: &[AccountRef],
        lines: &[LedgerLine],
    ) -> Result<IncomeStatementReport, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }

        let balances = Self::accumulate(lines.iter().filter(|l| l.date >= start && l.date <= end));

        let mut revenue = IncomeStatementSection::default();
        let mut expenses = IncomeStatementSection::default();

        for account in Self::sorted_by_code(accounts) {
            let Some(balance) = balances.get(&account.id) else {
                continue;
            };
            let signed = balance.signed(account.account_type.normal_balance());
            if signed.is_zero() {
                continue;
            }

            let section = match account.account_type {
                AccountType::Revenue => &mut revenue,
                AccountType::Expense => &mut expenses,
                _ => continue,
            };
            section.total += signed;
            section.rows.push(IncomeStatementRow {
                account_id: account.id,
                name: account.name.clone(),
                balance: signed,
            });
        }

        Ok(IncomeStatementReport {
            period_start: start,
            period_end: end,
            net_income: revenue.total - expenses.total,
            revenue,
            expenses,
        })
    }

    /// Generates an account statement over `[start, end]`.
    ///
    /// Opening balance is the classified balance of all lines strictly
    /// before `start`; the running balance walks in-period lines in
    /// chronological order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `start > end`.
    pub fn account_statement(
        account: &AccountRef,
        start: NaiveDate,
        end: NaiveDate,
        lines: &[LedgerLine],
    ) -> Result<AccountStatementReport, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }

        let normal = account.account_type.normal_balance();

        let opening_balance: Decimal = lines
            .iter()
            .filter(|l| l.account_id == account.id && l.date < start)
            .map(|l| normal.signed_balance(l.debit, l.credit))
            .sum();

        let mut in_range: Vec<&LedgerLine> = lines
            .iter()
            .filter(|l| l.account_id == account.id && l.date >= start && l.date <= end)
            .collect();
        // Chronological walk; transaction id (UUIDv7) breaks date ties in
        // creation order.
        in_range.sort_by_key(|l| (l.date, l.transaction_id));

        let mut running = opening_balance;
        let entries: Vec<StatementEntry> = in_range
            .into_iter()
            .map(|line| {
                running += normal.signed_balance(line.debit, line.credit);
                StatementEntry {
                    date: line.date,
                    transaction_id: line.transaction_id,
                    description: line.description.clone(),
                    debit: line.debit,
                    credit: line.credit,
                    running_balance: running,
                }
            })
            .collect();

        Ok(AccountStatementReport {
            account_id: account.id,
            period_start: start,
            period_end: end,
            opening_balance,
            entries,
            closing_balance: running,
        })
    }

    /// Sums raw debits and credits per account.
    fn accumulate<'a, I>(lines: I) -> BTreeMap<AccountId, AccountBalance>
    where
        I: Iterator<Item = &'a LedgerLine>,
    {
        let mut balances: BTreeMap<AccountId, AccountBalance> = BTreeMap::new();
        for line in lines {
            let balance = balances
                .entry(line.account_id)
                .or_insert_with(|| AccountBalance::new(line.account_id));
            balance.add_debit(line.debit);
            balance.add_credit(line.credit);
        }
        balances
    }

    fn sorted_by_code(accounts: &[AccountRef]) -> Vec<&AccountRef> {
        let mut sorted: Vec<&AccountRef> = accounts.iter().collect();
        sorted.sort_by(|a, b| a.code.cmp(&b.code));
        sorted
    }

    fn push_row(section: &mut BalanceSheetSection, account: &AccountRef, balance: Decimal) {
        section.total += balance;
        section.rows.push(BalanceSheetRow {
            account_id: Some(account.id),
            name: account.name.clone(),
            balance,
        });
    }
}
