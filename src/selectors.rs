//! Every CSS selector the pipeline depends on, grouped per page kind.
//!
//! Glints ships obfuscated styled-component class names that change whenever
//! the site redeploys its frontend. Keeping them here as plain configuration
//! data means a markup change is a one-file fix instead of a hunt through the
//! scraping code.

#[derive(Debug, Clone)]
pub struct LoginSelectors {
    pub email_option: &'static str,
    pub email_field: &'static str,
    pub password_field: &'static str,
    pub submit_button: &'static str,
    pub profile_menu: &'static str,
}

impl Default for LoginSelectors {
    fn default() -> Self {
        LoginSelectors {
            email_option: "a.LinkStyle__StyledLink-sc-usx229-0:nth-child(3)",
            email_field: "#login-form-email",
            password_field: "#login-form-password",
            submit_button: ".ButtonStyle__SolidShadowBtn-sc-jyb3o2-3",
            profile_menu: ".UserMenuComponentssc__NameHolder-sc-ovl5x6-4",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListingSelectors {
    /// Presence of any job card is the page-ready signal.
    pub ready: &'static str,
    pub job_card: &'static str,
    pub job_link: &'static str,
    pub page_button: &'static str,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        ListingSelectors {
            ready: "div.JobCardsc__JobcardContainer-sc-hmqj50-0",
            job_card: "div.JobCardsc__JobcardContainer-sc-hmqj50-0.iirqVR.CompactOpportunityCardsc__CompactJobCardWrapper-sc-dkg8my-5.hRilQl",
            job_link: "a.CompactOpportunityCardsc__JobCardTitleNoStyleAnchor-sc-dkg8my-12.jHptbP",
            page_button: "button.UnstyledButton-sc-zp0cw8-0.AnchorPaginationsc__Number-sc-8wke03-3.dYSdtB.bkvUQn",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailSelectors {
    /// The job title doubles as the page-ready signal.
    pub title: &'static str,
    pub job_type: &'static str,
    pub education: &'static str,
    pub experience: &'static str,
    pub salary: &'static str,
    pub posted_at: &'static str,
    pub skills_container: &'static str,
    pub requirement_tag: &'static str,
    pub province: &'static str,
    pub city: &'static str,
    pub district: &'static str,
    pub company_name: &'static str,
    pub company_industry: &'static str,
    pub company_size: &'static str,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        DetailSelectors {
            title: "h1.TopFoldsc__JobOverViewTitle-sc-1fbktg5-3",
            job_type: "div.TopFoldsc__JobOverViewInfo-sc-1fbktg5-9:nth-child(3)",
            education: "div.TopFoldsc__JobOverViewInfo-sc-1fbktg5-9:nth-child(4) > span",
            experience: "div.TopFoldsc__JobOverViewInfo-sc-1fbktg5-9:nth-child(5)",
            salary: ".TopFoldsc__BasicSalary-sc-1fbktg5-13",
            posted_at: "span.TopFoldsc__PostedAt-sc-1fbktg5-12.fcmpfD",
            skills_container: "div.Opportunitysc__SkillsContainer-sc-gb4ubh-10.jccjri",
            requirement_tag: "div.TagStyle-sc-r1wv7a-4.bJWZOt.JobRequirementssc__Tag-sc-15g5po6-3.cIkSrV",
            province: "label.BreadcrumbStyle__BreadcrumbItemWrapper-sc-eq3cq-0:nth-child(3) > a",
            city: "label.BreadcrumbStyle__BreadcrumbItemWrapper-sc-eq3cq-0:nth-child(4) > a",
            district: "label.BreadcrumbStyle__BreadcrumbItemWrapper-sc-eq3cq-0:nth-child(5) > a",
            company_name: ".AboutCompanySectionsc__Title-sc-c7oevo-6 > a",
            company_industry: ".AboutCompanySectionsc__CompanyIndustryAndSize-sc-c7oevo-7 > span:nth-of-type(1)",
            company_size: ".AboutCompanySectionsc__CompanyIndustryAndSize-sc-c7oevo-7 > span:nth-of-type(2)",
        }
    }
}

/// The complete selector configuration for one harvest run.
#[derive(Debug, Clone, Default)]
pub struct SelectorSet {
    pub login: LoginSelectors,
    pub listing: ListingSelectors,
    pub detail: DetailSelectors,
}
